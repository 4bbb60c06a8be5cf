//! 統合テスト
//!
//! フィードファイル → 監視ループ → 処理 → 集計の端から端までを検証する。

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use sentiview::{
    ChartSnapshot, DefaultMessageProcessor, FeedEvent, FeedWatcherService, SentimentTracker,
    ServiceState, WatcherConfig,
};

fn fixture_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push("sentiment_feed.ndjson");
    path
}

/// フィクスチャ全行を「各行が一度は末尾行だった」想定で流す
fn run_fixture_through_pipeline() -> SentimentTracker {
    let processor = DefaultMessageProcessor::new();
    let mut tracker = SentimentTracker::new();

    let content = std::fs::read_to_string(fixture_path()).unwrap();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        processor.process_line(line, &mut tracker).unwrap();
    }

    tracker
}

/// パイプライン統合テスト
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_fixture_aggregation() {
        let tracker = run_fixture_through_pipeline();

        // カテゴリは初出順で5つ
        let snapshot = tracker.snapshot();
        let names: Vec<&str> = snapshot
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["joy", "anger", "unknown", "calm", "surprise"]);
        assert_eq!(snapshot.total_messages, 7);

        // joy: (0.8 + 0.4) / 2
        assert!((tracker.average_for("joy").unwrap() - 0.6).abs() < 1e-9);
        // カテゴリ欠落行は unknown に集計される
        assert!((tracker.average_for("unknown").unwrap() - 0.5).abs() < 1e-9);
        // calm: sentiment欠落行は0として件数だけ増える → (0.0 + 0.1) / 2
        let calm = tracker.aggregate_for("calm").unwrap();
        assert_eq!(calm.message_count, 2);
        assert!((calm.total_sentiment - 0.1).abs() < 1e-9);
        // 文字列タイムスタンプも重複排除キーとして使えるだけ
        assert!((tracker.average_for("surprise").unwrap() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_fixture_replay_is_idempotent() {
        let processor = DefaultMessageProcessor::new();
        let mut tracker = SentimentTracker::new();

        let content = std::fs::read_to_string(fixture_path()).unwrap();
        // 2周流しても集計は1周分のまま
        for _ in 0..2 {
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                processor.process_line(line, &mut tracker).unwrap();
            }
        }

        assert_eq!(tracker.total_messages(), 7);
        assert!((tracker.average_for("joy").unwrap() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_line_does_not_poison_pipeline() {
        let processor = DefaultMessageProcessor::new();
        let mut tracker = SentimentTracker::new();

        processor
            .process_line(r#"{"timestamp":1,"category":"joy","sentiment":0.8}"#, &mut tracker)
            .unwrap();
        assert!(processor.process_line("{truncated", &mut tracker).is_err());
        assert!(processor.process_line("\"just a string\"", &mut tracker).is_err());
        processor
            .process_line(r#"{"timestamp":2,"category":"joy","sentiment":0.4}"#, &mut tracker)
            .unwrap();

        // 異常行は集計に影響しない
        assert_eq!(tracker.total_messages(), 2);
        assert!((tracker.average_for("joy").unwrap() - 0.6).abs() < 1e-9);
    }
}

/// 監視ループ統合テスト
mod watcher_tests {
    use super::*;

    async fn wait_for_snapshot(
        events: &mut mpsc::UnboundedReceiver<FeedEvent>,
    ) -> ChartSnapshot {
        loop {
            let event = timeout(Duration::from_secs(5), events.recv())
                .await
                .expect("timed out waiting for feed event")
                .expect("event channel closed unexpectedly");
            if let FeedEvent::Snapshot(snapshot) = event {
                return snapshot;
            }
        }
    }

    #[tokio::test]
    async fn test_watcher_tails_appended_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.ndjson");
        std::fs::write(
            &path,
            "{\"timestamp\":1,\"category\":\"joy\",\"sentiment\":0.8}\n",
        )
        .unwrap();

        let mut service = FeedWatcherService::new();
        let mut events = service
            .start_watching(WatcherConfig {
                feed_path: path.clone(),
                poll_interval_ms: 20,
            })
            .await
            .unwrap();

        let first = wait_for_snapshot(&mut events).await;
        assert_eq!(first.total_messages, 1);
        assert_eq!(first.categories[0].name, "joy");

        // 追記された行が次のポーリングで反映される
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        writeln!(
            file,
            "{{\"timestamp\":2,\"category\":\"joy\",\"sentiment\":0.4}}"
        )
        .unwrap();
        drop(file);

        let second = wait_for_snapshot(&mut events).await;
        assert_eq!(second.total_messages, 2);
        assert!((second.categories[0].average - 0.6).abs() < 1e-9);

        service.stop_watching().await.unwrap();
    }

    #[tokio::test]
    async fn test_watcher_does_not_reprocess_trailing_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.ndjson");
        std::fs::write(
            &path,
            "{\"timestamp\":1,\"category\":\"joy\",\"sentiment\":0.8}\n",
        )
        .unwrap();

        let mut service = FeedWatcherService::new();
        let mut events = service
            .start_watching(WatcherConfig {
                feed_path: path.clone(),
                poll_interval_ms: 10,
            })
            .await
            .unwrap();

        let first = wait_for_snapshot(&mut events).await;
        assert_eq!(first.total_messages, 1);

        // 同じ末尾行が何度読まれてもスナップショットは増えない
        let extra = timeout(Duration::from_millis(200), events.recv()).await;
        assert!(extra.is_err(), "duplicate trailing line produced an event");

        service.stop_watching().await.unwrap();
    }

    #[tokio::test]
    async fn test_watcher_stops_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.ndjson");
        std::fs::write(&path, "").unwrap();

        let mut service = FeedWatcherService::new();
        let mut events = service
            .start_watching(WatcherConfig {
                feed_path: path,
                poll_interval_ms: 10,
            })
            .await
            .unwrap();

        service.stop_watching().await.unwrap();

        loop {
            let event = timeout(Duration::from_secs(5), events.recv())
                .await
                .expect("timed out waiting for shutdown")
                .expect("event channel closed before Stopped event");
            if matches!(event, FeedEvent::Stopped) {
                break;
            }
        }

        assert_eq!(service.get_state().await, ServiceState::Idle);
    }

    #[tokio::test]
    async fn test_missing_feed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.ndjson");

        let mut service = FeedWatcherService::new();
        let mut events = service
            .start_watching(WatcherConfig {
                feed_path: path,
                poll_interval_ms: 10,
            })
            .await
            .unwrap();

        let event = timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("timed out waiting for fatal event")
            .expect("event channel closed unexpectedly");
        assert!(matches!(event, FeedEvent::Fatal(_)));

        // リトライせずエラー状態で停止する
        match service.get_state().await {
            ServiceState::Error(message) => {
                assert!(message.contains("File I/O error"));
            }
            other => panic!("Expected error state, got {:?}", other),
        }
    }
}
