//! Email body normalization.
//!
//! Raw email files carry a fixed three-line header (marker line, header
//! value, separator) followed by the body. Scoring only ever sees a
//! normalized body:
//!
//! 1. The three header lines are dropped
//! 2. The remaining lines are joined with single spaces
//! 3. Everything but ASCII letters and digits becomes a space
//! 4. Whitespace runs collapse to single spaces
//! 5. The result is cut to a bounded prefix
//!
//! The normalized body is used both for length scoring and for
//! tokenization, so both consumers see exactly the same text.

/// Number of header lines preceding the body in an email file.
pub const HEADER_LINE_COUNT: usize = 3;

/// Maximum number of characters of normalized body kept for scoring.
///
/// If the first 400 characters of two emails do not match closely enough,
/// the rest of the contents are unlikely to either. The cut is a hard
/// character-count cut, not word-aware.
pub const BODY_PREFIX_LIMIT: usize = 400;

/// Normalizes a raw email into its comparable body form.
///
/// Empty input returns an empty string immediately, without attempting
/// header removal. This guards against malformed or header-only files.
///
/// The output contains only ASCII letters, digits, and single spaces, so
/// its byte length equals its character length.
pub fn normalize_body(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut last_space = false;
    for (idx, line) in raw.split('\n').skip(HEADER_LINE_COUNT).enumerate() {
        // Line breaks collapse like any other whitespace run.
        if idx > 0 && !last_space {
            out.push(' ');
            last_space = true;
        }
        for ch in line.chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch);
                last_space = false;
            } else if !last_space {
                out.push(' ');
                last_space = true;
            }
        }
    }

    out.truncate(BODY_PREFIX_LIMIT);
    out
}
