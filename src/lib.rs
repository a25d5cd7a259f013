//! Word-Ripple: a deadline-bounded word-frequency crawler
//!
//! This crate crawls a set of starting pages (remote or `file://`) to a bounded
//! depth within a wall-clock deadline, and reports the most popular words found
//! together with the number of distinct pages visited.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod profiler;

use thiserror::Error;

/// Main error type for Word-Ripple operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profiler error: {0}")]
    Profiler(#[from] ProfilerError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern in config: {0}")]
    InvalidPattern(#[from] filter::PatternError),
}

/// Profiling-specific errors
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("{0} doesn't have profiled operations")]
    NoProfiledOperations(String),

    #[error("Failed to write profiling data: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Word-Ripple operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlSettings};
pub use crawler::{Coordinator, ParallelCrawler, SequentialCrawler, WebCrawler};
pub use output::CrawlResult;
pub use profiler::Profiler;
