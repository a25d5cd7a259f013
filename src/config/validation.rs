use crate::config::types::{
    Config, CrawlOptions, CrawlSettings, CrawlerConfig, Implementation, OutputConfig,
};
use crate::crawler::{available_parallelism, effective_parallelism};
use crate::filter::PatternSet;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_start_pages(&config.crawler.start_pages)?;
    parse_implementation(&config.crawler.implementation_override)?;
    Ok(())
}

/// Validates and compiles a configuration into runtime settings
pub fn compile(config: &Config) -> Result<CrawlSettings, ConfigError> {
    validate(config)?;

    let crawler = &config.crawler;
    let options = CrawlOptions {
        max_depth: u32::try_from(crawler.max_depth).map_err(|_| {
            ConfigError::Validation(format!("max_depth is out of range: {}", crawler.max_depth))
        })?,
        timeout: Duration::try_from_secs_f64(crawler.timeout_seconds).map_err(|e| {
            ConfigError::Validation(format!(
                "timeout_seconds is out of range: {} ({})",
                crawler.timeout_seconds, e
            ))
        })?,
        popular_word_count: usize::try_from(crawler.popular_word_count).map_err(|_| {
            ConfigError::Validation(format!(
                "popular_word_count is out of range: {}",
                crawler.popular_word_count
            ))
        })?,
        ignored_urls: PatternSet::new(&crawler.ignored_urls)?,
        ignored_words: PatternSet::new(&crawler.ignored_words)?,
    };

    let (result_path, profile_output_path) = output_paths(&config.output);

    Ok(CrawlSettings {
        start_pages: crawler.start_pages.clone(),
        options,
        parallelism: resolve_parallelism(crawler.parallelism),
        implementation: parse_implementation(&crawler.implementation_override)?,
        result_path,
        profile_output_path,
    })
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 0 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be >= 0, got {}",
            config.max_depth
        )));
    }

    if !config.timeout_seconds.is_finite() || config.timeout_seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout_seconds must be > 0, got {}",
            config.timeout_seconds
        )));
    }

    if config.popular_word_count < 0 {
        return Err(ConfigError::Validation(format!(
            "popular_word_count must be >= 0, got {}",
            config.popular_word_count
        )));
    }

    Ok(())
}

/// Checks seed URLs
///
/// Nothing here is fatal. A malformed seed is crawled like any other
/// unreachable page and simply contributes nothing, and no seeds at all make
/// an empty crawl.
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    if pages.is_empty() {
        tracing::warn!("No start pages configured; the crawl will be empty");
    }

    for page in pages {
        if Url::parse(page).is_err() {
            tracing::warn!("Start page '{}' is not a valid URL and will be empty", page);
        }
    }

    Ok(())
}

fn parse_implementation(value: &str) -> Result<Implementation, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "parallel" => Ok(Implementation::Parallel),
        "sequential" => Ok(Implementation::Sequential),
        other => Err(ConfigError::Validation(format!(
            "implementation_override must be 'parallel' or 'sequential', got '{}'",
            other
        ))),
    }
}

/// Resolves the requested worker count against the available cores
///
/// Values <= 0 and values above the core count both resolve to the core count.
pub fn resolve_parallelism(requested: i64) -> usize {
    usize::try_from(requested)
        .map(effective_parallelism)
        .unwrap_or_else(|_| available_parallelism())
}

fn output_paths(config: &OutputConfig) -> (Option<String>, Option<String>) {
    let non_empty = |path: &str| {
        let path = path.trim();
        (!path.is_empty()).then(|| path.to_string())
    };
    (
        non_empty(&config.result_path),
        non_empty(&config.profile_output_path),
    )
}
