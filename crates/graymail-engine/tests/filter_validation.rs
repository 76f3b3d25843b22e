//! Integration tests validating the full scoring pipeline.
//!
//! These tests drive the engine the way a host does: raw email text in,
//! bucket assignments and probabilities out. They verify the documented
//! behavior end to end:
//!
//! - Duplicate emails share a bucket at full similarity
//! - Unrelated emails found their own buckets
//! - Normalization makes punctuation variants comparable
//! - Length dampening keeps long emails from capturing short ones
//! - Probability is occupancy-dominated and saturates at 100
//! - Reset fully isolates consecutive runs

use graymail_engine::{BucketId, SpamFilter};

// =============================================================================
// Test Helpers
// =============================================================================

/// Builds a well-formed email file: marker, header value, separator, body.
fn email(subject: &str, body: &str) -> String {
    format!("header:\n{subject}\n\n{body}")
}

/// A filter reset to the default threshold and spam count.
fn default_filter() -> SpamFilter {
    let mut filter = SpamFilter::new();
    filter.reset(70.0, 5);
    filter
}

// =============================================================================
// Bucket assignment
// =============================================================================

#[test]
fn duplicate_emails_share_a_bucket_at_full_similarity() {
    let mut filter = default_filter();
    let raw = email("Weekly offer", "act now and win a fabulous prize today");

    let first = filter.score_email(&raw);
    let second = filter.score_email(&raw);

    assert_eq!(first.bucket, BucketId::new(0));
    assert_eq!(first.score, 0.0);
    assert_eq!(second.bucket, first.bucket);
    assert_eq!(second.score, 100.0);
    assert_eq!(filter.bucket_count(), 1);
}

#[test]
fn unrelated_emails_found_their_own_buckets() {
    let mut filter = default_filter();

    let first = filter.score_email(&email("Lunch", "sandwiches in the kitchen at noon"));
    let second = filter.score_email(&email("Build", "nightly pipeline failed during linking"));

    assert_eq!(first.bucket, BucketId::new(0));
    assert_eq!(second.bucket, BucketId::new(1));
    assert_eq!(second.score, 0.0);
    assert_eq!(filter.bucket_count(), 2);
}

#[test]
fn punctuation_variants_compare_as_equal() {
    let mut filter = default_filter();

    let clean = filter.score_email(&email("Offer", "act now and win a prize"));
    let noisy = filter.score_email(&email("Offer!!!", "act NOW -- and win... a prize!"));

    // Symbols normalize to spaces, so the word sets coincide. The noisy
    // variant keeps "NOW" distinct from "now", which still clears the
    // threshold comfortably.
    assert_eq!(noisy.bucket, clean.bucket);
    assert!(noisy.score >= 70.0);
}

#[test]
fn long_email_does_not_capture_its_short_subset() {
    let mut filter = default_filter();
    let long_body = "win money now with this totally legitimate offer that rewards \
                     careful readers handsomely every single day of the week";

    let long = filter.score_email(&email("Offer", long_body));
    let short = filter.score_email(&email("Offer", "win money now"));

    // Every word of the short email appears in the long one, but the
    // length mismatch dampens the score below the threshold.
    assert_ne!(short.bucket, long.bucket);
    assert_eq!(filter.bucket_count(), 2);
}

#[test]
fn empty_body_emails_group_together() {
    let mut filter = default_filter();

    let first = filter.score_email(&email("Empty", ""));
    let second = filter.score_email(&email("Also empty", ""));

    assert_eq!(first.score, 0.0);
    assert_eq!(second.bucket, first.bucket);
    assert_eq!(second.score, 100.0);
}

#[test]
fn threshold_decides_between_joining_and_founding() {
    let first = email("Intro", "hello my name is Matt green");
    let second = email("Intro", "hello my name are Blue yellow");

    // Half the words overlap, comparable lengths: candidate score 50.
    let mut lenient = SpamFilter::new();
    lenient.reset(40.0, 5);
    lenient.score_email(&first);
    let joined = lenient.score_email(&second);
    assert_eq!(joined.bucket, BucketId::new(0));
    assert_eq!(joined.score, 50.0);

    let mut strict = SpamFilter::new();
    strict.reset(90.0, 5);
    strict.score_email(&first);
    let split = strict.score_email(&second);
    assert_eq!(split.bucket, BucketId::new(1));
    assert_eq!(split.score, 0.0);
}

// =============================================================================
// Two-phase batch: bucketize everything, then assign probabilities
// =============================================================================

#[test]
fn probabilities_reflect_final_member_counts() {
    let mut filter = default_filter();
    let spam = email("You won", "claim your exclusive reward before midnight tonight");
    let ham = email("Standup", "moved to half past nine tomorrow");

    // Phase 1: the whole batch is bucketized before any probability is
    // assigned, so the first spam email sees the final occupancy too.
    let mut results = Vec::new();
    for _ in 0..5 {
        results.push(filter.score_email(&spam));
    }
    results.push(filter.score_email(&ham));

    // Phase 2.
    let first_spam = filter
        .assign_probability(results[0].bucket, results[0].score)
        .unwrap();
    let last_spam = filter
        .assign_probability(results[4].bucket, results[4].score)
        .unwrap();
    let lone_ham = filter
        .assign_probability(results[5].bucket, results[5].score)
        .unwrap();

    // Founder score is 0, but occupancy alone saturates the 80% term.
    assert_eq!(first_spam, 80.0);
    assert_eq!(last_spam, 100.0);
    // 20*0 + 80*(1/5) = 16.
    assert_eq!(lone_ham, 16.0);
}

#[test]
fn probability_never_exceeds_one_hundred() {
    let mut filter = default_filter();
    let spam = email("You won", "claim your exclusive reward before midnight tonight");

    let mut last = filter.score_email(&spam);
    for _ in 0..9 {
        last = filter.score_email(&spam);
    }

    // Ten members against a spam count of five computes far above 100 and
    // is reported as exactly 100.
    let probability = filter.assign_probability(last.bucket, last.score).unwrap();
    assert_eq!(probability, 100.0);
}

// =============================================================================
// Reset isolation
// =============================================================================

#[test]
fn reset_isolates_consecutive_runs() {
    let mut filter = default_filter();
    filter.score_email(&email("Offer", "act now and win a prize"));
    filter.score_email(&email("Build", "nightly pipeline failed during linking"));
    assert_eq!(filter.bucket_count(), 2);

    filter.reset(55.0, 3);

    assert_eq!(filter.bucket_count(), 0);
    assert_eq!(filter.threshold(), 55.0);
    assert_eq!(filter.spam_count(), 3);
    assert!(filter.get_bucket(BucketId::new(0)).is_none());

    // The next email founds bucket 0 again from a clean slate.
    let result = filter.score_email(&email("Offer", "act now and win a prize"));
    assert_eq!(result.bucket, BucketId::new(0));
    assert_eq!(result.score, 0.0);
}
