pub mod analytics;
pub mod consumer;
pub mod gui;
pub mod io;

// Re-export the main error types for convenience
pub use consumer::ProcessingError;
pub use io::FeedError;

// Re-export I/O utilities for convenience
pub use io::ndjson::{parse_feed_file, parse_feed_file_generic, read_latest_line, FeedRecord};

// Re-export pipeline types
pub use analytics::{CategoryAggregate, CategorySnapshot, ChartSnapshot, SentimentTracker};
pub use consumer::{
    global_feed_service, DefaultMessageProcessor, FeedEvent, FeedService, FeedWatcherService,
    ProcessOutcome, ServiceState, WatcherConfig,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Test that the main modules are accessible
        assert!(std::any::type_name::<analytics::SentimentTracker>().contains("SentimentTracker"));
        assert!(
            std::any::type_name::<consumer::FeedWatcherService>().contains("FeedWatcherService")
        );
    }

    #[test]
    fn test_public_api_availability() {
        // Test that key public functions are available
        let _result: Result<Vec<FeedRecord>, FeedError> = parse_feed_file("test.ndjson");
        let _latest = read_latest_line(std::path::Path::new("test.ndjson"));

        let mut tracker = SentimentTracker::new();
        let processor = DefaultMessageProcessor::new();
        let _outcome = processor.process_line(r#"{"timestamp":1}"#, &mut tracker);
    }

    #[test]
    fn test_error_types_re_exported() {
        // Test that error types are available from the crate root
        let _feed_error = FeedError::generic("test", "message");
        let _snapshot = ChartSnapshot::default();
        let _state = ServiceState::default();
    }
}
