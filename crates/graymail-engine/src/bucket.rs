//! Spam buckets and filter configuration.
//!
//! A bucket is anchored by the first email assigned to it: that email's
//! word set and normalized body length are frozen at creation and every
//! later member is compared against them. Buckets are never merged or
//! deleted except by a full reset, so a bucket id (its index in the store)
//! stays valid for the whole run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Default similarity threshold: emails scoring at or above this join an
/// existing bucket instead of founding their own.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 70.0;

/// Default number of similar emails needed to constitute spam.
pub const DEFAULT_SPAM_COUNT: u32 = 5;

/// Identifier of a bucket: its index in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(pub usize);

impl BucketId {
    /// Creates a new BucketId from a store index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying store index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bucket-{}", self.0)
    }
}

/// A cluster of emails judged similar to one founding email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    /// Unique words of the founding email's normalized body.
    /// Frozen at creation; later members never widen it.
    pub word_set: HashSet<String>,

    /// Character length of the founding email's normalized body.
    pub reference_length: usize,

    /// Number of emails ever assigned here, the founder included.
    pub member_count: u32,
}

impl Bucket {
    /// Creates a bucket anchored by its founding email.
    pub fn founded_by(word_set: HashSet<String>, reference_length: usize) -> Self {
        Self {
            word_set,
            reference_length,
            member_count: 1,
        }
    }

    /// Checks if the bucket still holds only its founder.
    pub fn is_singleton(&self) -> bool {
        self.member_count == 1
    }
}

/// Tunable knobs for a filtering run. Installed atomically by a reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum similarity score (0-100) to join an existing bucket.
    pub similarity_threshold: f64,

    /// Bucket occupancy at which spam probability saturates.
    pub spam_count: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            spam_count: DEFAULT_SPAM_COUNT,
        }
    }
}
