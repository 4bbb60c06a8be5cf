//! I/O utilities for feed file processing.
//!
//! This module provides utilities for reading and processing the NDJSON
//! feed file produced by the other half of the pipeline.

pub mod ndjson;

// Re-export commonly used types and functions
pub use ndjson::{parse_feed_file, read_latest_line, FeedError, FeedRecord};
