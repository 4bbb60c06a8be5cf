// Consumer pipeline modules
pub mod processor; // メッセージ処理パイプライン
pub mod watcher; // フィード監視ループ

pub use processor::{
    DefaultMessageProcessor, MessageProcessorConfig, ProcessOutcome, ProcessingError,
};
pub use watcher::{
    global_feed_service, FeedEvent, FeedService, FeedWatcherService, ServiceState, WatcherConfig,
};
