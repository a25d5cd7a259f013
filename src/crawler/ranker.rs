//! Word popularity ranking

/// Returns the `limit` most popular words
///
/// Entries are ordered by count, highest first. Equal counts are ordered by
/// the word itself, ascending, so the ranking does not depend on the
/// iteration order of the input map. A `limit` of zero yields nothing; a
/// `limit` above the number of distinct words yields all of them.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use word_ripple::crawler::rank_words;
///
/// let counts = HashMap::from([
///     ("b".to_string(), 5),
///     ("a".to_string(), 5),
///     ("c".to_string(), 1),
/// ]);
/// let ranked = rank_words(counts, 2);
/// assert_eq!(ranked, [("a".to_string(), 5), ("b".to_string(), 5)]);
/// ```
pub fn rank_words<I>(counts: I, limit: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (String, u64)>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(word_a, count_a), (word_b, count_b)| {
        count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
    });
    ranked.truncate(limit);
    ranked
}
