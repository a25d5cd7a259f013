use crate::output::OutputResult;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The outcome of one crawl
///
/// `word_counts` holds the most popular words in rank order;
/// `urls_visited` is the number of distinct URLs claimed during the crawl,
/// including pages whose fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    /// Builds a result from ranked word counts
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Ranked `(word, count)` pairs, most popular first
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    /// Count for `word`, if it made it into the ranked result
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(candidate, _)| candidate == word)
            .map(|(_, count)| *count)
    }

    /// Ranked words without their counts
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.word_counts.iter().map(|(word, _)| word.as_str())
    }
}

/// Serializes ranked pairs as a map, keeping rank order
struct RankedWords<'a>(&'a [(String, u64)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

/// Writes the result as pretty JSON to `path`, replacing any existing file
pub fn write_result(result: &CrawlResult, path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_result_to(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the result as pretty JSON to any writer
pub fn write_result_to<W: Write>(result: &CrawlResult, writer: &mut W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
