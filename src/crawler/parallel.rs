//! Parallel crawl engine
//!
//! The crawl is a tree of tokio tasks. Each seed gets a root task; a task
//! that fetched its page spawns one child per link into its own `JoinSet`
//! and waits for all of them before it completes, so no task outlives its
//! parent and nothing is left running once `crawl` returns.
//!
//! Each URL is fetched once. When a task reaches an already fetched URL with
//! more hops left than the task that fetched it, the stored links are
//! followed again at the larger depth, so the pages visited do not depend on
//! which path happened to arrive first.
//!
//! At most `parallelism` fetches are in flight at once. A permit is held only
//! while a page is being fetched, never while a parent waits for its
//! children, so the tree cannot starve itself of permits.

use crate::clock::{Clock, Deadline};
use crate::config::CrawlOptions;
use crate::crawler::{
    available_parallelism, effective_parallelism, rank_words, Claim, PageParser, VisitedSet,
    WebCrawler, WordCounts,
};
use crate::filter::tally_words;
use crate::output::CrawlResult;
use crate::profiler::Profiled;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Crawler that fetches pages concurrently on the tokio runtime
pub struct ParallelCrawler {
    options: CrawlOptions,
    parallelism: usize,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

/// State shared by every task of one `crawl` call
struct CrawlContext {
    options: CrawlOptions,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    fetch_permits: Semaphore,
    visited: VisitedSet,
    counts: WordCounts,
}

/// One node of the crawl tree
#[derive(Debug, Clone)]
struct CrawlTask {
    url: String,
    remaining_depth: u32,
    deadline: Deadline,
}

impl CrawlTask {
    /// Processes this page, then runs and joins one child task per link
    ///
    /// A page already fetched by another task is not fetched again; if this
    /// task reached it with more depth left, its links are followed again.
    fn run(self, ctx: Arc<CrawlContext>) -> BoxFuture<'static, ()> {
        async move {
            if self.remaining_depth == 0 || self.already_covered(&ctx) {
                return;
            }

            if ctx.options.ignored_urls.matches(&self.url) {
                tracing::trace!("Ignoring {}", self.url);
                return;
            }

            let (links, expand_depth) = {
                let Ok(_permit) = ctx.fetch_permits.acquire().await else {
                    return;
                };

                // Checked after queueing for a permit so no fetch starts late
                if self.deadline.has_passed(ctx.clock.as_ref()) {
                    return;
                }

                match ctx.visited.claim(&self.url, self.remaining_depth) {
                    Claim::Skip => return,
                    Claim::Expand(links) => {
                        tracing::trace!(
                            "Re-expanding {} with {} hops left",
                            self.url,
                            self.remaining_depth - 1
                        );
                        (links, self.remaining_depth)
                    }
                    Claim::Fetch => {
                        tracing::debug!(
                            "Fetching {} ({} hops left)",
                            self.url,
                            self.remaining_depth - 1
                        );
                        let page = ctx.parser.parse(&self.url).await;
                        ctx.counts
                            .merge(tally_words(&page.words, &ctx.options.ignored_words));

                        match ctx.visited.record_links(&self.url, page.links) {
                            Some(recorded) => recorded,
                            None => return,
                        }
                    }
                }
            };

            if links.is_empty() || self.deadline.has_passed(ctx.clock.as_ref()) {
                return;
            }

            let mut children = JoinSet::new();
            for link in links.iter() {
                let child = CrawlTask {
                    url: link.clone(),
                    remaining_depth: expand_depth - 1,
                    deadline: self.deadline,
                };
                children.spawn(child.run(Arc::clone(&ctx)));
            }
            join_all(&mut children, &self.url).await;
        }
        .boxed()
    }

    /// True when an earlier visit had at least as much depth left
    fn already_covered(&self, ctx: &CrawlContext) -> bool {
        ctx.visited
            .remaining_depth(&self.url)
            .is_some_and(|claimed| claimed >= self.remaining_depth)
    }
}

/// Waits for every task in `tasks`
///
/// A panicking task only loses its own subtree; siblings keep running.
async fn join_all(tasks: &mut JoinSet<()>, parent: &str) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Crawl task under {} failed: {}", parent, e);
        }
    }
}

impl ParallelCrawler {
    /// Creates a parallel crawler
    ///
    /// # Arguments
    ///
    /// * `options` - Depth, timeout, filters and result size
    /// * `parallelism` - Maximum concurrent fetches; 0 or anything above the
    ///   number of available cores means the number of available cores
    /// * `parser` - Page fetch/parse port
    /// * `clock` - Time source for the deadline
    pub fn new(
        options: CrawlOptions,
        parallelism: usize,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            options,
            parallelism: effective_parallelism(parallelism),
            parser,
            clock,
        }
    }

    /// Number of concurrent fetches this crawler allows
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let deadline = Deadline::after(self.clock.as_ref(), self.options.timeout);
        let ctx = Arc::new(CrawlContext {
            options: self.options.clone(),
            parser: Arc::clone(&self.parser),
            clock: Arc::clone(&self.clock),
            fetch_permits: Semaphore::new(self.parallelism),
            visited: VisitedSet::new(),
            counts: WordCounts::new(),
        });

        let mut roots = JoinSet::new();
        for url in starting_urls {
            let task = CrawlTask {
                url: url.clone(),
                remaining_depth: self.options.max_depth,
                deadline,
            };
            roots.spawn(task.run(Arc::clone(&ctx)));
        }
        join_all(&mut roots, "crawl root").await;

        tracing::info!(
            "Parallel crawl visited {} pages, {} distinct words ({} workers)",
            ctx.visited.len(),
            ctx.counts.len(),
            self.parallelism
        );

        CrawlResult::new(
            rank_words(ctx.counts.snapshot(), self.options.popular_word_count),
            ctx.visited.len(),
        )
    }

    fn max_parallelism(&self) -> usize {
        available_parallelism()
    }
}

impl Profiled for ParallelCrawler {
    fn type_name(&self) -> &'static str {
        "ParallelCrawler"
    }

    fn profiled_operations(&self) -> &'static [&'static str] {
        &["crawl"]
    }
}
