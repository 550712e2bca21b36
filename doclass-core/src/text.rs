use std::collections::BTreeMap;

use crate::StopWords;

/// Token -> occurrence count for a single document.
///
/// Ordered by token so that anything accumulated over the counts (such as
/// floating-point log scores) is summed in the same order on every call.
pub type WordCounts<'a> = BTreeMap<&'a str, usize>;

/// Splits `text` into tokens on any run of whitespace.
///
/// No punctuation stripping and no case folding: `"Cat"`, `"cat"` and
/// `"cat,"` are three distinct tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Counts how many times each whitespace-delimited token occurs in `text`.
///
/// # Examples
///
/// ```rust
/// use doclass_core::text::count_words;
///
/// let counts = count_words("to be or not to be");
/// assert_eq!(counts["to"], 2);
/// assert_eq!(counts["or"], 1);
/// assert_eq!(counts.len(), 4);
/// ```
pub fn count_words(text: &str) -> WordCounts<'_> {
    let mut counts = WordCounts::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Like [`count_words`], but drops every token contained in `stop_words`.
pub fn count_words_filtered<'a>(text: &'a str, stop_words: &StopWords) -> WordCounts<'a> {
    let mut counts = WordCounts::new();
    for token in tokenize(text).filter(|t| !stop_words.contains(t)) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
