//! Word-set tokenization of normalized bodies.

use std::collections::HashSet;

/// Splits a normalized body into its set of unique words.
///
/// The normalizer guarantees single-space separation, so splitting on the
/// space character is enough. Empty fragments are filtered out explicitly:
/// splitting an empty string yields one empty fragment, and without the
/// filter an empty body would map to a one-element set containing the
/// empty token instead of the empty set.
///
/// Tokens are kept case-sensitive; the normalizer does not fold case.
pub fn tokenize(body: &str) -> HashSet<String> {
    body.split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
