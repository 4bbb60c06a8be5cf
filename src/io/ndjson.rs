//! NDJSON (Newline Delimited JSON) feed file processing utilities.
//!
//! This module provides functions for reading and parsing the NDJSON feed
//! file the consumer tails, with comprehensive error handling and validation.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Comprehensive error types for feed file I/O and parsing operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error when reading the feed file
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error at line {line}: {source}")]
    JsonParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid feed format
    #[error("Invalid feed format: {reason}")]
    InvalidFormat { reason: String },

    /// Empty or invalid data
    #[error("No valid data found: {context}")]
    NoData { context: String },

    /// Generic error with context
    #[error("Error in {context}: {message}")]
    Generic { context: String, message: String },
}

impl FeedError {
    /// Create a new generic error with context
    pub fn generic(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generic {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create a no data error
    pub fn no_data(context: impl Into<String>) -> Self {
        Self::NoData {
            context: context.into(),
        }
    }
}

/// One feed message as written by the producer side of the pipeline.
///
/// Every field is optional on the wire; the consumer substitutes defaults
/// for whatever is missing. `timestamp` is only ever used as a dedup key,
/// so it stays an opaque JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeedRecord {
    /// Dedup key; any JSON value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
    /// Grouping label for the chart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Numeric sentiment score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
}

/// Read the feed file and return only its trailing line.
///
/// This is the watcher contract: the whole file is read on every poll and
/// every line except the last is discarded. No offset is tracked between
/// calls. A missing file propagates as [`FeedError::Io`] — the caller
/// decides whether that is fatal.
///
/// # Arguments
/// * `path` - Path to the NDJSON feed file
///
/// # Returns
/// `Ok(None)` for an empty file, otherwise the raw trailing line.
pub fn read_latest_line(path: &Path) -> Result<Option<String>, FeedError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut latest = None;
    for line in reader.lines() {
        latest = Some(line?);
    }

    Ok(latest)
}

/// Parse an entire NDJSON feed file into typed entries.
///
/// This is a generic function that can parse any NDJSON file where each
/// line is one JSON value. Used by the test tooling and fixtures; the live
/// watcher only ever looks at the trailing line via [`read_latest_line`].
///
/// # Arguments
/// * `path` - Path to the NDJSON file
/// * `validate_entry` - Optional validation function for each entry
///
/// # Returns
/// A vector of entries or a FeedError
pub fn parse_feed_file_generic<T, F>(
    path: &str,
    validate_entry: Option<F>,
) -> Result<Vec<T>, FeedError>
where
    T: for<'de> Deserialize<'de>,
    F: Fn(&T) -> Result<(), FeedError>,
{
    let file = File::open(path).map_err(|e| {
        FeedError::generic("opening file", format!("Failed to open '{}': {}", path, e))
    })?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let entry: T = serde_json::from_str(&line).map_err(|e| FeedError::JsonParse {
            line: line_number + 1,
            source: e,
        })?;

        // Apply validation if provided
        if let Some(ref validator) = validate_entry {
            validator(&entry)?;
        }

        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(FeedError::no_data(format!(
            "No valid entries found in file '{}'",
            path
        )));
    }

    Ok(entries)
}

/// Parse an NDJSON feed file into [`FeedRecord`] entries.
///
/// # Arguments
/// * `path` - Path to the NDJSON file
///
/// # Returns
/// A vector of FeedRecord objects or a FeedError
pub fn parse_feed_file(path: &str) -> Result<Vec<FeedRecord>, FeedError> {
    parse_feed_file_generic::<FeedRecord, fn(&FeedRecord) -> Result<(), FeedError>>(path, None)
}
