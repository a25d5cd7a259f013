use crate::clock::Clock;
use crate::crawler::WebCrawler;
use crate::output::CrawlResult;
use crate::profiler::{Profiled, ProfilingState};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Decorator that times the profiled operations of a crawler
///
/// It implements [`WebCrawler`] itself and forwards every call to the
/// wrapped crawler unchanged; only the timing is added.
pub struct ProfiledCrawler<T> {
    delegate: T,
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
}

impl<T: Profiled> ProfiledCrawler<T> {
    pub(crate) fn new(delegate: T, clock: Arc<dyn Clock>, state: Arc<ProfilingState>) -> Self {
        Self {
            delegate,
            clock,
            state,
        }
    }

    /// The wrapped crawler
    pub fn delegate(&self) -> &T {
        &self.delegate
    }

    /// Starts timing `operation` if it is profiled
    fn start(&self, operation: &str) -> Option<Instant> {
        self.delegate
            .profiled_operations()
            .iter()
            .any(|profiled| *profiled == operation)
            .then(|| self.clock.instant())
    }

    fn finish(&self, operation: &str, started: Option<Instant>) {
        if let Some(started) = started {
            let elapsed = self.clock.instant().saturating_duration_since(started);
            self.state.record(self.delegate.type_name(), operation, elapsed);
        }
    }
}

#[async_trait]
impl<T: WebCrawler> WebCrawler for ProfiledCrawler<T> {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let started = self.start("crawl");
        let result = self.delegate.crawl(starting_urls).await;
        self.finish("crawl", started);
        result
    }

    fn max_parallelism(&self) -> usize {
        let started = self.start("max_parallelism");
        let parallelism = self.delegate.max_parallelism();
        self.finish("max_parallelism", started);
        parallelism
    }
}

impl<T: Profiled> Profiled for ProfiledCrawler<T> {
    fn type_name(&self) -> &'static str {
        self.delegate.type_name()
    }

    fn profiled_operations(&self) -> &'static [&'static str] {
        self.delegate.profiled_operations()
    }
}
