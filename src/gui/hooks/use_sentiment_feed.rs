//! センチメントフィード用カスタムフック
//!
//! 監視サービスとDioxusシグナルを接続する。集計を書き換えるのは
//! 監視ループだけで、ここではスナップショットを受け取って描画用
//! シグナルへ流し込むだけにする。

use dioxus::prelude::*;
use parking_lot::Mutex;

use crate::analytics::ChartSnapshot;
use crate::consumer::{global_feed_service, FeedEvent, ServiceState, WatcherConfig};

/// 起動時にバイナリ側から注入される監視設定
static LAUNCH_CONFIG: Mutex<Option<WatcherConfig>> = Mutex::new(None);

/// Dioxus起動前に監視設定を登録する
pub fn set_launch_config(config: WatcherConfig) {
    *LAUNCH_CONFIG.lock() = Some(config);
}

/// 登録済みの監視設定（未登録ならデフォルト）
pub fn launch_config() -> WatcherConfig {
    LAUNCH_CONFIG.lock().clone().unwrap_or_default()
}

/// センチメントフィードハンドル
#[derive(Clone)]
pub struct FeedHandle {
    /// 最新のチャートスナップショット
    pub snapshot: Signal<ChartSnapshot>,
    /// サービス状態
    pub state: Signal<ServiceState>,
    /// 直近の致命的エラー
    pub last_error: Signal<Option<String>>,
    /// 監視開始時刻（稼働時間表示用）
    pub started_at: Signal<Option<chrono::DateTime<chrono::Utc>>>,
}

impl PartialEq for FeedHandle {
    fn eq(&self, _other: &Self) -> bool {
        // Signalの比較は困難なので、常にfalseとして扱う
        // これによりpropsの変更が検出される
        false
    }
}

impl FeedHandle {
    /// フィード監視を開始
    pub fn start_watching(&self, config: WatcherConfig) {
        let mut snapshot = self.snapshot;
        let mut state = self.state;
        let mut last_error = self.last_error;
        let mut started_at = self.started_at;

        spawn(async move {
            let service_arc = global_feed_service();

            let receiver = {
                let mut service = service_arc.lock().await;
                service.start_watching(config).await
            };

            let mut receiver = match receiver {
                Ok(receiver) => receiver,
                Err(e) => {
                    tracing::error!("❌ Failed to start feed watching: {}", e);
                    state.set(ServiceState::Error(e.to_string()));
                    return;
                }
            };

            tracing::info!("✅ Feed watching started");
            state.set(ServiceState::Watching);
            last_error.set(None);
            started_at.set(Some(chrono::Utc::now()));

            // 監視ループからのイベントをシグナルへ反映する
            while let Some(event) = receiver.recv().await {
                match event {
                    FeedEvent::Snapshot(next) => {
                        snapshot.set(next);
                    }
                    FeedEvent::Fatal(message) => {
                        tracing::error!("❌ Feed watching aborted: {}", message);
                        last_error.set(Some(message.clone()));
                        state.set(ServiceState::Error(message));
                        break;
                    }
                    FeedEvent::Stopped => {
                        // 停止後も最後のチャートは画面に残る
                        state.set(ServiceState::Idle);
                        break;
                    }
                }
            }
        });
    }

    /// フィード監視を停止
    ///
    /// 集計とチャートはクリアされない。状態遷移は監視ループが送る
    /// `Stopped`イベント経由で反映される。
    pub fn stop_watching(&self) {
        spawn(async move {
            tracing::info!("⏹️ Stopping feed watching");
            let service_arc = global_feed_service();
            let result = {
                let mut service = service_arc.lock().await;
                service.stop_watching().await
            };
            if let Err(e) = result {
                tracing::error!("Error stopping feed watching: {}", e);
            }
        });
    }

    /// 監視中かどうか
    pub fn is_watching(&self) -> bool {
        *self.state.read() == ServiceState::Watching
    }
}

/// センチメントフィードフック
///
/// シグナルを初期化し、初回マウント時に登録済み設定で監視を自動開始する。
pub fn use_sentiment_feed() -> FeedHandle {
    let snapshot = use_signal(ChartSnapshot::default);
    let state = use_signal(ServiceState::default);
    let last_error = use_signal(|| None::<String>);
    let started_at = use_signal(|| None::<chrono::DateTime<chrono::Utc>>);

    let handle = FeedHandle {
        snapshot,
        state,
        last_error,
        started_at,
    };

    // 起動直後から監視を開始する（シグナルは購読しないため1回だけ走る）
    use_effect({
        let handle = handle.clone();
        move || {
            handle.start_watching(launch_config());
        }
    });

    handle
}
