// カスタムフック
pub mod use_sentiment_feed;

pub use use_sentiment_feed::{launch_config, set_launch_config, use_sentiment_feed, FeedHandle};
