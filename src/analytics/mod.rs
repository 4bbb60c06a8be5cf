pub mod sentiment_tracker;

pub use sentiment_tracker::*;
