//! Sequential crawl engine
//!
//! Visits one page at a time in strict depth-first, seed order. A page
//! reached again over a shorter path is not refetched, but its links are
//! followed again with the extra depth. For a fixed set of pages its output
//! is fully deterministic, which makes it the reference the parallel engine
//! is checked against.

use crate::clock::{Clock, Deadline};
use crate::config::CrawlOptions;
use crate::crawler::{rank_words, PageParser, WebCrawler};
use crate::filter::tally_words;
use crate::output::CrawlResult;
use crate::profiler::Profiled;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Arc;

/// Single-threaded depth-first crawler
pub struct SequentialCrawler {
    options: CrawlOptions,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

/// Mutable state of one `crawl` call
struct Traversal {
    deadline: Deadline,
    /// Largest remaining depth each URL was reached at, with its links
    visited: HashMap<String, (u32, Vec<String>)>,
    counts: HashMap<String, u64>,
}

impl SequentialCrawler {
    pub fn new(options: CrawlOptions, parser: Arc<dyn PageParser>, clock: Arc<dyn Clock>) -> Self {
        Self {
            options,
            parser,
            clock,
        }
    }

    /// Visits `url` and then, depth-first, every link on it
    ///
    /// A URL is fetched only once. Reaching it again with more depth left
    /// follows its links again without refetching it.
    fn visit<'a>(
        &'a self,
        url: String,
        remaining_depth: u32,
        traversal: &'a mut Traversal,
    ) -> BoxFuture<'a, ()> {
        async move {
            if remaining_depth == 0 || traversal.deadline.has_passed(self.clock.as_ref()) {
                return;
            }

            if self.options.ignored_urls.matches(&url) {
                tracing::trace!("Ignoring {}", url);
                return;
            }

            let links = match traversal.visited.get_mut(&url) {
                Some((claimed, _)) if *claimed >= remaining_depth => return,
                Some((claimed, links)) => {
                    *claimed = remaining_depth;
                    tracing::trace!("Re-expanding {} with {} hops left", url, remaining_depth - 1);
                    links.clone()
                }
                None => {
                    traversal.visited.insert(url.clone(), (remaining_depth, Vec::new()));

                    tracing::debug!("Fetching {} ({} hops left)", url, remaining_depth - 1);
                    let page = self.parser.parse(&url).await;

                    for (word, count) in tally_words(&page.words, &self.options.ignored_words) {
                        *traversal.counts.entry(word).or_insert(0) += count;
                    }

                    if let Some((_, links)) = traversal.visited.get_mut(&url) {
                        links.clone_from(&page.links);
                    }
                    page.links
                }
            };

            for link in links {
                self.visit(link, remaining_depth - 1, traversal).await;
            }
        }
        .boxed()
    }
}

#[async_trait]
impl WebCrawler for SequentialCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let mut traversal = Traversal {
            deadline: Deadline::after(self.clock.as_ref(), self.options.timeout),
            visited: HashMap::new(),
            counts: HashMap::new(),
        };

        for url in starting_urls {
            self.visit(url.clone(), self.options.max_depth, &mut traversal)
                .await;
        }

        tracing::info!(
            "Sequential crawl visited {} pages, {} distinct words",
            traversal.visited.len(),
            traversal.counts.len()
        );

        CrawlResult::new(
            rank_words(traversal.counts, self.options.popular_word_count),
            traversal.visited.len(),
        )
    }
}

impl Profiled for SequentialCrawler {
    fn type_name(&self) -> &'static str {
        "SequentialCrawler"
    }

    fn profiled_operations(&self) -> &'static [&'static str] {
        &["crawl"]
    }
}
