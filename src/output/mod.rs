//! Output module for crawl results
//!
//! This module defines the [`CrawlResult`] record returned by every crawl
//! engine and writes it out as a pretty-printed JSON document.

mod result;

pub use result::{write_result, write_result_to, CrawlResult};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
