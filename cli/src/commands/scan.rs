//! SCAN command - list mailbox contents without scoring.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::{HumanReadable, output};
use crate::mailbox;
use graymail_engine::normalize_body;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    // No additional arguments needed
}

/// Mailbox listing produced by the scan command.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub mailbox: String,
    pub emails: Vec<ScanRow>,
}

/// One mailbox entry.
#[derive(Debug, Serialize)]
pub struct ScanRow {
    pub index: usize,
    pub header: String,
    pub body_sample: String,
    pub body_length: usize,
    pub well_formed: bool,
}

pub fn execute(dir: &Path, human: bool, _args: ScanArgs) -> Result<()> {
    let emails = mailbox::scan(dir)?;

    let rows = emails
        .iter()
        .map(|email| ScanRow {
            index: email.index,
            header: email.header_sample(),
            body_sample: email.body_sample(),
            body_length: if email.is_well_formed() {
                normalize_body(&email.text).len()
            } else {
                0
            },
            well_formed: email.is_well_formed(),
        })
        .collect();

    let report = ScanReport {
        mailbox: dir.display().to_string(),
        emails: rows,
    };
    output(&report, human)
}

impl HumanReadable for ScanReport {
    fn print_human(&self) {
        println!("{} {}", "Mailbox:".bold(), self.mailbox);
        println!();
        for row in &self.emails {
            let marker = if row.well_formed {
                format!("{:>3}", row.index).normal()
            } else {
                format!("{:>3}", row.index).red()
            };
            println!(
                "{}  {:<27}  {:<19}  {} chars",
                marker, row.header, row.body_sample, row.body_length
            );
        }
        println!();
        println!("{} emails", self.emails.len());
    }
}
