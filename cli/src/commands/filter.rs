//! FILTER command - bucketize the mailbox and assign spam probabilities.
//!
//! Two sequential passes over the same batch: every well-formed email is
//! scored and bucketized in file-index order first, and only once the
//! whole batch is placed are probabilities assigned, because member counts
//! are not final until every email has landed. Malformed files bypass the
//! engine entirely and come back with the sentinel bucket.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::{HumanReadable, output};
use crate::mailbox::{self, MALFORMED_BUCKET};
use graymail_engine::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SPAM_COUNT, ScoreResult, SpamFilter};

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// Similarity score (0-100) needed to join an existing bucket
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    /// Number of similar emails needed to constitute spam
    #[arg(long, default_value_t = DEFAULT_SPAM_COUNT, value_parser = clap::value_parser!(u32).range(1..))]
    pub spam_count: u32,
}

/// Full filtering run over one mailbox.
#[derive(Debug, Serialize)]
pub struct FilterReport {
    pub threshold: f64,
    pub spam_count: u32,
    pub bucket_count: usize,
    pub emails: Vec<EmailRow>,
}

/// Verdict per email. Sentinel bucket -1 marks malformed files.
#[derive(Debug, Serialize)]
pub struct EmailRow {
    pub index: usize,
    pub header: String,
    pub bucket: i64,
    pub score: f64,
    pub probability: f64,
    pub verdict: Verdict,
}

/// Spam verdict derived from the assigned probability.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ham,
    Suspect,
    Spam,
}

impl Verdict {
    /// Probability cut points: below 40 ham, below 70 suspect, spam above.
    fn from_probability(probability: f64) -> Self {
        if probability < 40.0 {
            Verdict::Ham
        } else if probability < 70.0 {
            Verdict::Suspect
        } else {
            Verdict::Spam
        }
    }
}

pub fn execute(dir: &Path, human: bool, args: FilterArgs) -> Result<()> {
    let emails = mailbox::scan(dir)?;

    let mut filter = SpamFilter::new();
    filter.reset(args.threshold, args.spam_count);

    // Pass 1: bucketize in file-index order.
    let mut scored: Vec<Option<ScoreResult>> = Vec::with_capacity(emails.len());
    for email in &emails {
        if email.is_well_formed() {
            scored.push(Some(filter.score_email(&email.text)));
        } else {
            tracing::warn!(index = email.index, "excluding malformed email file");
            scored.push(None);
        }
    }

    // Pass 2: assign probabilities now that member counts are final.
    let mut rows = Vec::with_capacity(emails.len());
    for (email, result) in emails.iter().zip(&scored) {
        let row = match result {
            Some(result) => {
                let probability = filter.assign_probability(result.bucket, result.score)?;
                EmailRow {
                    index: email.index,
                    header: email.header_sample(),
                    bucket: result.bucket.index() as i64,
                    score: result.score,
                    probability,
                    verdict: Verdict::from_probability(probability),
                }
            }
            None => EmailRow {
                index: email.index,
                header: email.header_sample(),
                bucket: MALFORMED_BUCKET,
                score: 100.0,
                probability: 100.0,
                verdict: Verdict::Spam,
            },
        };
        rows.push(row);
    }

    let report = FilterReport {
        threshold: args.threshold,
        spam_count: args.spam_count,
        bucket_count: filter.bucket_count(),
        emails: rows,
    };
    output(&report, human)
}

impl HumanReadable for FilterReport {
    fn print_human(&self) {
        println!(
            "{} threshold={} spam_count={}",
            "Filter run:".bold(),
            self.threshold,
            self.spam_count
        );
        println!();
        for row in &self.emails {
            let verdict = match row.verdict {
                Verdict::Ham => "ham".green(),
                Verdict::Suspect => "suspect".yellow(),
                Verdict::Spam => "spam".red(),
            };
            println!(
                "{:>3}  {:<27}  bucket {:>3}  score {:>6.2}  probability {:>6.2}%  {}",
                row.index, row.header, row.bucket, row.score, row.probability, verdict
            );
        }
        println!();
        println!(
            "{} emails across {} buckets",
            self.emails.len(),
            self.bucket_count
        );
    }
}
