// Core modules
pub mod config_manager; // 設定管理モジュール
pub mod utils; // ユーティリティ関数

// Dioxus UI components
pub mod components; // UI コンポーネント
pub mod hooks; // センチメントフィードフック
pub mod styles; // スタイル

// Core functionality exports
pub use components::MainWindow;
pub use config_manager::{AppConfig, ConfigManager, LogConfig, WindowConfig};
pub use hooks::{use_sentiment_feed, FeedHandle};
