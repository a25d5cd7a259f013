//! Configuration module for Word-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and compiling them into the [`CrawlSettings`] used at runtime.
//!
//! # Example
//!
//! ```no_run
//! use word_ripple::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", settings.options.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlOptions, CrawlSettings, CrawlerConfig, Implementation, OutputConfig,
};

// Re-export parser and validation functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_settings, load_settings_with_hash,
};
pub use validation::{compile, resolve_parallelism};
