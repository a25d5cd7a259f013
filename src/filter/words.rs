use crate::filter::PatternSet;
use std::collections::HashMap;

/// Normalizes a raw word for counting
///
/// Strips every non-word character (anything other than letters, digits and
/// `_`) and lower-cases the rest. Letters and digits are Unicode-aware, so
/// accented words keep their accents. Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use word_ripple::filter::normalize_word;
///
/// assert_eq!(normalize_word("Hello!!"), Some("hello".to_string()));
/// assert_eq!(normalize_word("--"), None);
/// ```
pub fn normalize_word(raw: &str) -> Option<String> {
    let word: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect();

    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Counts the words of one page
///
/// Each raw word is normalized first; empty results and words fully matching
/// an ignored pattern are dropped.
pub fn tally_words<I, S>(words: I, ignored_words: &PatternSet) -> HashMap<String, u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tally = HashMap::new();

    for word in words
        .into_iter()
        .filter_map(|raw| normalize_word(raw.as_ref()))
        .filter(|word| !ignored_words.matches(word))
    {
        *tally.entry(word).or_insert(0) += 1;
    }

    tally
}
