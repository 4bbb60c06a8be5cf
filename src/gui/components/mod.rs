// Dioxus GUI Components Module

pub mod main_window;
pub mod sentiment_chart;
pub mod status_panel;

// Re-exports for convenience
pub use main_window::MainWindow;
pub use sentiment_chart::SentimentChart;
pub use status_panel::CompactStatusPanel;
