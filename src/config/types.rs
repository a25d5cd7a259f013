use crate::filter::PatternSet;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Word-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
///
/// Numeric fields are signed so that negative values in the file are
/// reported by validation instead of failing inside the TOML parser.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs, crawled in order
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    /// URLs fully matching any of these patterns are never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Words fully matching any of these patterns are never counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Maximum number of link hops, the seed itself consuming one
    #[serde(rename = "max-depth")]
    pub max_depth: i64,

    /// Wall-clock budget for the whole crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: f64,

    /// Number of top-ranked words kept in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: i64,

    /// Maximum concurrent fetches (<= 0 means use all available cores)
    #[serde(default)]
    pub parallelism: i64,

    /// Forces an engine: "parallel" (default) or "sequential"
    #[serde(rename = "implementation-override", default)]
    pub implementation_override: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON result file (empty writes to stdout)
    #[serde(rename = "result-path", default)]
    pub result_path: String,

    /// Path of the profiling report, appended to (empty writes to stdout)
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: String,
}

/// Which crawl engine to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Implementation {
    #[default]
    Parallel,
    Sequential,
}

/// Options shared by both crawl engines
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub max_depth: u32,
    pub timeout: Duration,
    pub popular_word_count: usize,
    pub ignored_urls: PatternSet,
    pub ignored_words: PatternSet,
}

/// Validated, compiled runtime view of a [`Config`]
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub start_pages: Vec<String>,
    pub options: CrawlOptions,
    /// Resolved worker count, always within `1..=available cores`
    pub parallelism: usize,
    pub implementation: Implementation,
    pub result_path: Option<String>,
    pub profile_output_path: Option<String>,
}
