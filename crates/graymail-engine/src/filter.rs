//! The bucketizing spam filter.
//!
//! This module implements greedy nearest-bucket assignment over an
//! append-only bucket store. For each incoming email:
//!
//! 1. Score the email's word set against every existing bucket
//! 2. Dampen each score when the email's length falls outside the
//!    bucket's ±30% length band
//! 3. Track the best-scoring bucket across the store
//! 4. Join that bucket if the best score reaches the similarity
//!    threshold, otherwise found a new bucket
//!
//! Bucket reference sets are frozen at creation (single-link, immutable
//! centroids), which trades clustering quality for determinism and
//! O(buckets) scoring per email. Spam probability is assigned separately,
//! after a whole batch has been bucketized, because member counts are not
//! final until then.
//!
//! The filter is strictly sequential: scoring mutates shared store state,
//! so a concurrent host must serialize calls or wrap the filter in a
//! mutual-exclusion primitive. There is no internal locking.

use crate::bucket::{Bucket, BucketId, FilterConfig};
use crate::normalize::normalize_body;
use crate::tokenize::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lower edge of the undamped length band, relative to the reference length.
const LENGTH_BAND_LOWER: f64 = 0.7;

/// Upper edge of the undamped length band, relative to the reference length.
const LENGTH_BAND_UPPER: f64 = 1.3;

/// Errors surfaced by the filter.
///
/// Scoring itself never fails: degenerate inputs (empty word sets, zero
/// lengths) produce well-defined numeric results. Only genuine contract
/// violations are reported as errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Probability was requested for a bucket id the store never issued.
    #[error("unknown bucket id: {0}")]
    BucketNotFound(BucketId),
}

/// Outcome of scoring one email against the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Bucket the email was placed in.
    pub bucket: BucketId,

    /// How well the email matched an existing bucket, 0-100, rounded to
    /// two decimals. Always 0 when the email founded a new bucket.
    pub score: f64,
}

/// Read-only view of one bucket for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketView {
    /// Character length of the founding email's normalized body.
    pub reference_length: usize,
    /// Number of emails assigned to the bucket.
    pub member_count: u32,
}

/// Aggregate statistics over the bucket store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Number of buckets.
    pub bucket_count: usize,
    /// Total emails assigned across all buckets.
    pub document_count: u64,
    /// Member count of the fullest bucket.
    pub largest_bucket: u32,
    /// Number of buckets holding only their founder.
    pub singleton_count: usize,
}

/// The spam filter engine: an ordered, append-only store of buckets plus
/// the active configuration.
///
/// The filter owns the bucket store exclusively. Callers never mutate
/// buckets directly; all changes go through [`SpamFilter::score_and_bucketize`]
/// and [`SpamFilter::reset`].
///
/// # Example
///
/// ```rust
/// use graymail_engine::SpamFilter;
///
/// let mut filter = SpamFilter::new();
/// filter.reset(70.0, 5);
///
/// // Pass 1: bucketize the whole batch.
/// let first = filter.score_email("header:\nHi\n\nbuy cheap pills now");
/// let second = filter.score_email("header:\nHi\n\nbuy cheap pills now");
/// assert_eq!(first.bucket, second.bucket);
///
/// // Pass 2: assign probabilities once member counts are final.
/// let probability = filter.assign_probability(second.bucket, second.score).unwrap();
/// assert!(probability > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpamFilter {
    buckets: Vec<Bucket>,
    config: FilterConfig,
}

impl SpamFilter {
    /// Creates an empty filter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty filter with a custom configuration.
    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            buckets: Vec::new(),
            config,
        }
    }

    /// Empties the bucket store and installs a new configuration.
    ///
    /// Must be called once before scoring the first email of a batch.
    /// Scoring calls within a batch are cumulative and order-dependent;
    /// there is no implicit reset between them.
    pub fn reset(&mut self, similarity_threshold: f64, spam_count: u32) {
        self.buckets.clear();
        self.config = FilterConfig {
            similarity_threshold,
            spam_count,
        };
        tracing::debug!(threshold = similarity_threshold, spam_count, "filter reset");
    }

    /// Read-only ordered view of the bucket store.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the active similarity threshold.
    pub fn threshold(&self) -> f64 {
        self.config.similarity_threshold
    }

    /// Returns the active spam count.
    pub fn spam_count(&self) -> u32 {
        self.config.spam_count
    }

    /// Returns the number of buckets in the store.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the total number of emails assigned across all buckets.
    pub fn document_count(&self) -> u64 {
        self.buckets.iter().map(|b| u64::from(b.member_count)).sum()
    }

    /// Diagnostics view of one bucket, or None for an unknown id.
    pub fn get_bucket(&self, id: BucketId) -> Option<BucketView> {
        self.buckets.get(id.index()).map(|bucket| BucketView {
            reference_length: bucket.reference_length,
            member_count: bucket.member_count,
        })
    }

    /// Aggregate statistics over the store.
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            bucket_count: self.buckets.len(),
            document_count: self.document_count(),
            largest_bucket: self
                .buckets
                .iter()
                .map(|b| b.member_count)
                .max()
                .unwrap_or(0),
            singleton_count: self.buckets.iter().filter(|b| b.is_singleton()).count(),
        }
    }

    /// Normalizes, tokenizes, and bucketizes a raw email in one step.
    ///
    /// Convenience composition of [`normalize_body`], [`tokenize`], and
    /// [`SpamFilter::score_and_bucketize`].
    pub fn score_email(&mut self, raw_text: &str) -> ScoreResult {
        let body = normalize_body(raw_text);
        let word_set = tokenize(&body);
        // Normalized bodies are pure ASCII, so byte length equals
        // character length.
        self.score_and_bucketize(&word_set, body.len())
    }

    /// Scores an email's word set against every bucket and places it.
    ///
    /// If the store is empty, the email founds bucket 0. Otherwise the
    /// best candidate score across all buckets decides: strictly below the
    /// similarity threshold founds a new bucket, at or above it joins the
    /// winner and increments its member count.
    ///
    /// The returned score reflects how well the email matched an existing
    /// bucket, rounded to two decimals; founding a new bucket always
    /// reports 0. The incoming word set is never mutated.
    ///
    /// This call always completes: degenerate inputs (empty sets, zero
    /// lengths) score as defined non-matches rather than failing.
    pub fn score_and_bucketize(
        &mut self,
        word_set: &HashSet<String>,
        body_length: usize,
    ) -> ScoreResult {
        if self.buckets.is_empty() {
            self.buckets
                .push(Bucket::founded_by(word_set.clone(), body_length));
            tracing::debug!(bucket = 0, "founded first bucket");
            return ScoreResult {
                bucket: BucketId::new(0),
                score: 0.0,
            };
        }

        let mut max_score = 0.0_f64;
        let mut best = BucketId::new(0);
        for (index, bucket) in self.buckets.iter().enumerate() {
            if let Some(score) = candidate_score(word_set, body_length, bucket) {
                if score > max_score {
                    max_score = score;
                    best = BucketId::new(index);
                }
            }
        }

        if max_score < self.config.similarity_threshold {
            let id = BucketId::new(self.buckets.len());
            self.buckets
                .push(Bucket::founded_by(word_set.clone(), body_length));
            tracing::debug!(bucket = id.index(), best_score = max_score, "founded new bucket");
            ScoreResult {
                bucket: id,
                score: 0.0,
            }
        } else {
            self.buckets[best.index()].member_count += 1;
            tracing::debug!(bucket = best.index(), score = max_score, "joined bucket");
            ScoreResult {
                bucket: best,
                score: round2(max_score),
            }
        }
    }

    /// Maps a bucketized email to a spam probability in [0, 100].
    ///
    /// Occupancy dominates: 80% of the probability is the bucket's member
    /// count relative to the configured spam count, 20% is the email's own
    /// similarity score. Rounded to two decimals and clamped at 100.
    ///
    /// Call this only after the whole batch has been bucketized; member
    /// counts are not final before that.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::BucketNotFound`] for a bucket id outside the
    /// store. Ids returned by [`SpamFilter::score_and_bucketize`] stay
    /// valid until the next reset.
    pub fn assign_probability(&self, bucket: BucketId, score: f64) -> Result<f64, FilterError> {
        let found = self
            .buckets
            .get(bucket.index())
            .ok_or(FilterError::BucketNotFound(bucket))?;

        let occupancy = f64::from(found.member_count) / f64::from(self.config.spam_count);
        let probability = 20.0 * (score / 100.0) + 80.0 * occupancy;
        Ok(round2(probability).min(100.0))
    }
}

/// Scores an incoming word set against one bucket, or None for the
/// undefined empty-versus-non-empty comparison.
fn candidate_score(incoming: &HashSet<String>, body_length: usize, bucket: &Bucket) -> Option<f64> {
    // Two empty bodies are maximally similar.
    if bucket.word_set.is_empty() && incoming.is_empty() {
        return Some(100.0);
    }

    let start_size = incoming.len();
    if start_size == 0 {
        // Empty email against a non-empty reference set: the overlap
        // ratio is undefined, so the bucket is not a candidate.
        return None;
    }

    // Share of incoming words already present in the reference set. The
    // incoming set is read, never mutated.
    let remaining = incoming
        .iter()
        .filter(|word| !bucket.word_set.contains(*word))
        .count();
    let similarity = 100.0 - 100.0 * remaining as f64 / start_size as f64;

    Some(similarity * length_dampening(body_length, bucket.reference_length))
}

/// Dampening factor for emails outside the bucket's length band.
///
/// Inside [0.7, 1.3] times the reference length the score is undamped.
/// Outside it, the score scales by `0.5 + 0.5*r` where `r` is the smaller
/// of the two length ratios, so a large length mismatch costs up to half
/// the score. This keeps one long, lexically rich email from becoming a
/// match-all magnet for short unrelated emails.
fn length_dampening(body_length: usize, reference_length: usize) -> f64 {
    let body = body_length as f64;
    let reference = reference_length as f64;

    if body <= reference * LENGTH_BAND_UPPER && body >= reference * LENGTH_BAND_LOWER {
        return 1.0;
    }

    let ratio = if body > reference {
        reference / body
    } else {
        body / reference
    };
    0.5 + 0.5 * ratio
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
