//! Filtering module for Word-Ripple
//!
//! This module provides whole-string regex matching for ignored URLs and
//! words, and the normalization applied to every word before it is counted.

mod patterns;
mod words;

// Re-export main types and functions
pub use patterns::{PatternError, PatternSet};
pub use words::{normalize_word, tally_words};
