//! Crawler coordinator - crawl orchestration
//!
//! The coordinator owns the validated settings and the collaborators of a
//! crawl (page parser and clock). It:
//! - Selects the sequential or parallel engine
//! - Optionally wraps the engine in a profiler
//! - Runs it from the configured start pages

use crate::clock::{Clock, SystemClock};
use crate::config::{compile, Config, CrawlSettings, Implementation};
use crate::crawler::{HtmlPageParser, PageParser, ParallelCrawler, SequentialCrawler, WebCrawler};
use crate::output::CrawlResult;
use crate::profiler::{Profiled, Profiler};
use crate::CrawlerError;
use std::sync::Arc;

/// Main crawl orchestration structure
pub struct Coordinator {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

impl Coordinator {
    /// Creates a coordinator that fetches real pages
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated crawl settings
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlerError)` - The HTTP client could not be built
    pub fn new(settings: CrawlSettings) -> Result<Self, CrawlerError> {
        let parser = HtmlPageParser::new(settings.options.timeout)?;
        Ok(Self::with_parts(
            settings,
            Arc::new(parser),
            Arc::new(SystemClock),
        ))
    }

    /// Validates `config` and creates a coordinator for it
    ///
    /// Validation failures are reported here, before any page is fetched.
    pub fn from_config(config: &Config) -> Result<Self, CrawlerError> {
        Self::new(compile(config)?)
    }

    /// Creates a coordinator with explicit collaborators
    pub fn with_parts(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            parser,
            clock,
        }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Builds the engine selected by the settings
    pub fn build_crawler(&self) -> Box<dyn WebCrawler> {
        let options = self.settings.options.clone();
        let parser = Arc::clone(&self.parser);
        let clock = Arc::clone(&self.clock);

        match self.settings.implementation {
            Implementation::Sequential => Box::new(SequentialCrawler::new(options, parser, clock)),
            Implementation::Parallel => Box::new(ParallelCrawler::new(
                options,
                self.settings.parallelism,
                parser,
                clock,
            )),
        }
    }

    /// Runs the crawl from the configured start pages
    pub async fn run(&self) -> Result<CrawlResult, CrawlerError> {
        let crawler = self.build_crawler();
        Ok(self.crawl_with(crawler.as_ref()).await)
    }

    /// Runs the crawl with the engine wrapped by `profiler`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The crawl finished
    /// * `Err(CrawlerError::Profiler)` - The engine could not be wrapped
    pub async fn run_profiled(&self, profiler: &Profiler) -> Result<CrawlResult, CrawlerError> {
        let crawler = profiler.wrap(self.build_crawler())?;
        Ok(self.crawl_with(&crawler).await)
    }

    async fn crawl_with(&self, crawler: &dyn WebCrawler) -> CrawlResult {
        tracing::info!(
            "Starting {} crawl of {} start pages (max depth {}, timeout {:?})",
            crawler.type_name(),
            self.settings.start_pages.len(),
            self.settings.options.max_depth,
            self.settings.options.timeout
        );

        let start_time = std::time::Instant::now();
        let result = crawler.crawl(&self.settings.start_pages).await;

        tracing::info!(
            "Crawl completed: {} pages visited, {} popular words in {:?}",
            result.urls_visited(),
            result.word_counts().len(),
            start_time.elapsed()
        );

        result
    }
}

/// Runs a complete crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Validate the configuration
/// 2. Build the HTTP client and page parser
/// 3. Select the engine
/// 4. Crawl from the start pages
///
/// # Example
///
/// ```no_run
/// use word_ripple::config::load_config;
/// use word_ripple::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawl.toml"))?;
/// let result = run_crawl(&config).await?;
/// println!("Visited {} pages", result.urls_visited());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlResult, CrawlerError> {
    Coordinator::from_config(config)?.run().await
}
