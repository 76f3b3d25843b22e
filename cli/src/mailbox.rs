//! Mailbox scanning and email file parsing.
//!
//! Emails live in a directory as `email0.txt`, `email1.txt`, ... and are
//! scanned upward from zero until the first missing index. The scan order
//! is the scoring order: bucketization is order-sensitive, so the mailbox
//! must hand emails to the engine in a fixed sequence.
//!
//! Each well-formed file starts with a fixed three-line header: the
//! literal marker line, the header value, and a separator. A file whose
//! first line is not the marker is malformed; it is excluded from scoring
//! entirely and reported with the sentinel bucket and maximal score.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Literal first line every well-formed email file must carry.
pub const HEADER_MARKER: &str = "header:";

/// Sentinel bucket id reported for malformed files.
pub const MALFORMED_BUCKET: i64 = -1;

/// Maximum header characters shown in listings.
const HEADER_SAMPLE_LIMIT: usize = 24;

/// Maximum body characters shown in listings.
const BODY_SAMPLE_LIMIT: usize = 16;

/// Errors from reading the mailbox directory.
#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    /// An email file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One email file pulled from the mailbox.
#[derive(Debug, Clone)]
pub struct EmailFile {
    /// Index in the mailbox scan order (the N in `emailN.txt`).
    pub index: usize,
    /// Full raw text of the file.
    pub text: String,
    /// Header value (line 2), or None when the marker line is wrong.
    pub header: Option<String>,
}

impl EmailFile {
    fn parse(index: usize, text: String) -> Self {
        let mut lines = text.split('\n');
        let header = if lines.next() == Some(HEADER_MARKER) {
            Some(lines.next().unwrap_or_default().to_string())
        } else {
            None
        };
        Self { index, text, header }
    }

    /// Whether the file carries the expected marker line.
    pub fn is_well_formed(&self) -> bool {
        self.header.is_some()
    }

    /// Truncated header value for listings.
    pub fn header_sample(&self) -> String {
        match &self.header {
            Some(header) => truncate(header, HEADER_SAMPLE_LIMIT),
            None => "Could not read file!".to_string(),
        }
    }

    /// Truncated first body line for listings.
    pub fn body_sample(&self) -> String {
        let first_body_line = self.text.split('\n').nth(3).unwrap_or_default();
        truncate(first_body_line, BODY_SAMPLE_LIMIT)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut sample: String = text.chars().take(limit).collect();
        sample.push_str("...");
        sample
    } else {
        text.to_string()
    }
}

/// Scans `dir` for `emailN.txt` files, stopping at the first missing index.
pub fn scan(dir: &Path) -> Result<Vec<EmailFile>, MailboxError> {
    let mut emails = Vec::new();
    for index in 0.. {
        let path = dir.join(format!("email{index}.txt"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => break,
            Err(source) => return Err(MailboxError::Read { path, source }),
        };
        emails.push(EmailFile::parse(index, text));
    }
    tracing::debug!(count = emails.len(), "scanned mailbox");
    Ok(emails)
}
