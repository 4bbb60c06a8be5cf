//! フィード監視サービス
//!
//! 一定間隔でフィードファイルを開き直し、末尾行だけを処理パイプラインへ
//! 渡すポーリングループ。集計を書き換えるのはループタスクだけで、GUIへは
//! スナップショットのみをチャネル経由で送る。

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex as TokioMutex};
use tracing::{debug, error, info, warn};

use crate::analytics::{ChartSnapshot, SentimentTracker};
use crate::consumer::processor::{DefaultMessageProcessor, ProcessOutcome};
use crate::io::ndjson::read_latest_line;

/// サービス状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ServiceState {
    /// 監視していない
    #[default]
    Idle,
    /// フィードを監視中
    Watching,
    /// 回復不能なエラーで停止
    Error(String),
}

/// 監視ループからGUIへ流れるイベント
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// 集計が更新された（最新スナップショット）
    Snapshot(ChartSnapshot),
    /// 回復不能なI/O障害でループが終了した
    Fatal(String),
    /// ユーザー要求により正常停止した
    Stopped,
}

/// 監視設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// 監視対象のNDJSONフィードファイル
    pub feed_path: PathBuf,
    /// ポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from("data/project_live.ndjson"),
            poll_interval_ms: 1000,
        }
    }
}

/// フィード監視の抽象インタフェース
#[async_trait]
pub trait FeedService: Send + Sync {
    /// フィード監視を開始
    async fn start_watching(
        &mut self,
        config: WatcherConfig,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<FeedEvent>>;

    /// フィード監視を停止
    async fn stop_watching(&mut self) -> anyhow::Result<()>;

    /// 現在のサービス状態を取得
    async fn get_state(&self) -> ServiceState;
}

/// フィード監視サービス
///
/// 集計トラッカーはサービスが保持する。監視を停止して再開しても
/// 「これまでに観測したカテゴリ集合」と処理済みタイムスタンプは
/// プロセスの生存期間中そのまま引き継がれる。
pub struct FeedWatcherService {
    state: Arc<TokioMutex<ServiceState>>,
    tracker: Arc<TokioMutex<SentimentTracker>>,
    shutdown_sender: Option<mpsc::UnboundedSender<()>>,
}

impl FeedWatcherService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(TokioMutex::new(ServiceState::Idle)),
            tracker: Arc::new(TokioMutex::new(SentimentTracker::new())),
            shutdown_sender: None,
        }
    }

    /// フィード監視開始
    ///
    /// 既に監視中の場合は先に既存ループへ停止を通知してから開始する。
    pub async fn start_watching(
        &mut self,
        config: WatcherConfig,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<FeedEvent>> {
        // 既存ループがあれば停止させる
        if let Some(previous) = self.shutdown_sender.take() {
            let _ = previous.send(());
        }

        {
            let mut state = self.state.lock().await;
            *state = ServiceState::Watching;
        }

        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::unbounded_channel();
        self.shutdown_sender = Some(shutdown_sender);

        tokio::spawn(watch_loop(
            config,
            event_sender,
            shutdown_receiver,
            Arc::clone(&self.state),
            Arc::clone(&self.tracker),
        ));

        Ok(event_receiver)
    }

    /// 現在の集計スナップショット
    pub async fn current_snapshot(&self) -> crate::analytics::ChartSnapshot {
        self.tracker.lock().await.snapshot()
    }

    /// フィード監視停止
    pub async fn stop_watching(&mut self) -> anyhow::Result<()> {
        if let Some(sender) = self.shutdown_sender.take() {
            // ループ側が既に終了していても問題ない
            let _ = sender.send(());
        }
        Ok(())
    }

    /// 現在のサービス状態
    pub async fn get_state(&self) -> ServiceState {
        self.state.lock().await.clone()
    }
}

impl Default for FeedWatcherService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedService for FeedWatcherService {
    async fn start_watching(
        &mut self,
        config: WatcherConfig,
    ) -> anyhow::Result<mpsc::UnboundedReceiver<FeedEvent>> {
        FeedWatcherService::start_watching(self, config).await
    }

    async fn stop_watching(&mut self) -> anyhow::Result<()> {
        FeedWatcherService::stop_watching(self).await
    }

    async fn get_state(&self) -> ServiceState {
        FeedWatcherService::get_state(self).await
    }
}

/// グローバル監視サービス（GUIと停止ハンドラで共有）
static GLOBAL_FEED_SERVICE: OnceLock<Arc<TokioMutex<FeedWatcherService>>> = OnceLock::new();

/// グローバル監視サービスを取得
pub fn global_feed_service() -> Arc<TokioMutex<FeedWatcherService>> {
    GLOBAL_FEED_SERVICE
        .get_or_init(|| Arc::new(TokioMutex::new(FeedWatcherService::new())))
        .clone()
}

/// 監視ループ本体
///
/// 毎イテレーションでフィードファイルを開き直し、全行を読み、末尾行のみを
/// 処理する。オフセットは追跡しない。メッセージ単位のエラーはログに落として
/// 続行し、I/O障害はループ全体を終了させる（リトライなし）。
async fn watch_loop(
    config: WatcherConfig,
    events: mpsc::UnboundedSender<FeedEvent>,
    mut shutdown: mpsc::UnboundedReceiver<()>,
    state: Arc<TokioMutex<ServiceState>>,
    tracker: Arc<TokioMutex<SentimentTracker>>,
) {
    let processor = DefaultMessageProcessor::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms.max(1)));

    info!(
        "🎬 Watching feed file {} for new messages",
        config.feed_path.display()
    );

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                info!("⏹️ Feed watching stopped by user");
                break;
            }
            _ = ticker.tick() => {
                match read_latest_line(&config.feed_path) {
                    Ok(Some(line)) => {
                        debug!("Reading message: {}", line);
                        let mut tracker = tracker.lock().await;
                        match processor.process_line(&line, &mut tracker) {
                            Ok(ProcessOutcome::Applied { category, sentiment }) => {
                                debug!(
                                    category = %category,
                                    sentiment,
                                    total = tracker.total_messages(),
                                    "📨 Message applied"
                                );
                                let _ = events.send(FeedEvent::Snapshot(tracker.snapshot()));
                            }
                            Ok(ProcessOutcome::Duplicate) => {}
                            Err(e) => {
                                warn!("⚠️ Skipping message: {}", e);
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!("❌ Error while consuming messages: {}", e);
                        {
                            let mut state = state.lock().await;
                            *state = ServiceState::Error(e.to_string());
                        }
                        let _ = events.send(FeedEvent::Fatal(e.to_string()));
                        return;
                    }
                }
            }
        }
    }

    {
        let mut state = state.lock().await;
        *state = ServiceState::Idle;
    }
    let _ = events.send(FeedEvent::Stopped);
}
