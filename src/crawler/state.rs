//! Shared crawl state for the parallel engine
//!
//! These are the only objects mutated by more than one worker during a crawl.
//! Both live for exactly one `crawl` call.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Outbound links of a fetched page, shared between re-expansions
pub type PageLinks = Arc<[String]>;

/// What a worker must do after reaching a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// First visit: the caller fetches the page
    Fetch,
    /// Reached again with more depth left than any earlier visit; the links
    /// of the already fetched page must be followed again at this depth
    Expand(PageLinks),
    /// Nothing to do. Either an earlier visit had at least as much depth
    /// left, or the page is still being fetched and its fetcher will expand
    /// it at the raised depth
    Skip,
}

#[derive(Debug)]
struct PageVisit {
    remaining_depth: u32,
    links: Option<PageLinks>,
}

/// URLs claimed during one crawl
///
/// Each URL is fetched at most once, but it is remembered with the largest
/// remaining depth it was reached at, so a later, shorter path to the same
/// page still reaches everything within the depth bound.
#[derive(Debug, Default)]
pub struct VisitedSet {
    pages: DashMap<String, PageVisit>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `url` at `remaining_depth`
    ///
    /// Exactly one caller per URL gets [`Claim::Fetch`], even when several
    /// workers race on the same link.
    pub fn claim(&self, url: &str, remaining_depth: u32) -> Claim {
        match self.pages.entry(url.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(PageVisit {
                    remaining_depth,
                    links: None,
                });
                Claim::Fetch
            }
            Entry::Occupied(mut occupied) => {
                let visit = occupied.get_mut();
                if remaining_depth <= visit.remaining_depth {
                    return Claim::Skip;
                }
                visit.remaining_depth = remaining_depth;
                match &visit.links {
                    Some(links) => Claim::Expand(Arc::clone(links)),
                    None => Claim::Skip,
                }
            }
        }
    }

    /// Stores the links of a fetched page
    ///
    /// Returns the links together with the depth to expand them at, which is
    /// the largest depth the URL has been claimed at so far. `None` if `url`
    /// was never claimed.
    pub fn record_links(&self, url: &str, links: Vec<String>) -> Option<(PageLinks, u32)> {
        let mut visit = self.pages.get_mut(url)?;
        let links: PageLinks = links.into();
        visit.links = Some(Arc::clone(&links));
        Some((links, visit.remaining_depth))
    }

    /// Largest remaining depth `url` was claimed at
    pub fn remaining_depth(&self, url: &str) -> Option<u32> {
        self.pages.get(url).map(|visit| visit.remaining_depth)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Running word totals shared by all workers
#[derive(Debug, Default)]
pub struct WordCounts {
    counts: DashMap<String, u64>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `word`
    ///
    /// The read-modify-write happens under the shard lock of `word`, so
    /// concurrent increments are never lost.
    pub fn add(&self, word: String, count: u64) {
        *self.counts.entry(word).or_insert(0) += count;
    }

    /// Adds every entry of a per-page tally
    pub fn merge(&self, tally: HashMap<String, u64>) {
        for (word, count) in tally {
            self.add(word, count);
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).map(|count| *count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Copies the current totals out of the accumulator
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
