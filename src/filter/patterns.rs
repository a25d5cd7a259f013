use regex::Regex;
use thiserror::Error;

/// A pattern that failed to compile
#[derive(Debug, Error)]
#[error("'{pattern}': {source}")]
pub struct PatternError {
    /// The pattern as written in the configuration
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// An ordered set of regular expressions matched against whole strings
///
/// A candidate is matched when it *fully* matches any one pattern, so
/// `http://a/.*` matches `http://a/x` but `a` does not match `banana`.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles each pattern, anchored at both ends
    ///
    /// # Arguments
    ///
    /// * `patterns` - Regular expressions in the `regex` crate syntax
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(PatternError)` - The first pattern that failed to compile
    ///
    /// # Examples
    ///
    /// ```
    /// use word_ripple::filter::PatternSet;
    ///
    /// let set = PatternSet::new(["http://a/.*"]).unwrap();
    /// assert!(set.matches("http://a/x"));
    /// assert!(!set.matches("http://b/http://a/x"));
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| PatternError {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if `candidate` fully matches any pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
