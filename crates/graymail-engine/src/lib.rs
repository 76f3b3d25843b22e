//! graymail-engine: content-similarity spam bucketing
//!
//! This crate provides:
//! - Normalization of raw email text into a bounded, comparable body
//! - Word-set tokenization of normalized bodies
//! - Greedy nearest-bucket assignment with a length-based score penalty
//! - Occupancy-weighted spam probability assignment
//!
//! ## Modules
//!
//! - [`normalize`]: header stripping, symbol squashing, prefix truncation
//! - [`tokenize`]: unique-word extraction from normalized bodies
//! - [`bucket`]: bucket store entries and filter configuration
//! - [`filter`]: the bucketizing engine and probability assigner
//!
//! ## Example Usage
//!
//! ```rust
//! use graymail_engine::SpamFilter;
//!
//! let emails = [
//!     "header:\nOffer\n\nbuy cheap pills now",
//!     "header:\nOffer again\n\nbuy cheap pills now",
//! ];
//!
//! let mut filter = SpamFilter::new();
//! filter.reset(70.0, 5);
//!
//! // Phase 1: bucketize the whole batch in a fixed order.
//! let results: Vec<_> = emails.iter().map(|raw| filter.score_email(raw)).collect();
//!
//! // Phase 2: member counts are final, assign probabilities.
//! for result in &results {
//!     let probability = filter.assign_probability(result.bucket, result.score)?;
//!     println!("{}: {probability}%", result.bucket);
//! }
//! # Ok::<(), graymail_engine::FilterError>(())
//! ```
//!
//! The engine is a pure, synchronous, single-threaded computation: no I/O,
//! no internal locking. A concurrent host must serialize scoring calls.
//! Results are order-sensitive by design; the caller fixes the document
//! order (typically file-index order) and keeps it.

pub mod bucket;
pub mod filter;
pub mod normalize;
pub mod tokenize;

// Re-export main types for convenience
pub use bucket::{
    Bucket, BucketId, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_SPAM_COUNT, FilterConfig,
};
pub use filter::{BucketView, FilterError, FilterStats, ScoreResult, SpamFilter};
pub use normalize::{BODY_PREFIX_LIMIT, HEADER_LINE_COUNT, normalize_body};
pub use tokenize::tokenize;
