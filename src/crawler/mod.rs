//! Crawler module for page fetching and word counting
//!
//! This module contains the core crawling logic, including:
//! - The page fetch/parse port and its HTML implementation
//! - The sequential (reference) and parallel crawl engines
//! - Shared concurrent crawl state and word ranking
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod page;
mod parallel;
mod parser;
mod ranker;
mod sequential;
mod state;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_document, FetchError};
pub use page::{HtmlPageParser, PageContent, PageParser};
pub use parallel::ParallelCrawler;
pub use parser::parse_html;
pub use ranker::rank_words;
pub use sequential::SequentialCrawler;
pub use state::{Claim, PageLinks, VisitedSet, WordCounts};

use crate::output::CrawlResult;
use crate::profiler::Profiled;
use async_trait::async_trait;
use std::num::NonZeroUsize;

/// A crawl engine
///
/// Every call to [`crawl`](WebCrawler::crawl) starts from empty state and
/// always produces a result; individual page failures are absorbed.
#[async_trait]
pub trait WebCrawler: Profiled + Send + Sync {
    /// Crawls from `starting_urls` and returns the ranked word counts
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult;

    /// Highest degree of parallelism this crawler can make use of
    fn max_parallelism(&self) -> usize {
        1
    }
}

#[async_trait]
impl<T: WebCrawler + ?Sized> WebCrawler for Box<T> {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        (**self).crawl(starting_urls).await
    }

    fn max_parallelism(&self) -> usize {
        (**self).max_parallelism()
    }
}

/// Number of hardware execution units available to this process
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Clamps a requested worker count to `1..=available_parallelism()`
///
/// Zero means "as many as available".
pub fn effective_parallelism(requested: usize) -> usize {
    let available = available_parallelism();
    if requested == 0 {
        available
    } else {
        requested.min(available)
    }
}
