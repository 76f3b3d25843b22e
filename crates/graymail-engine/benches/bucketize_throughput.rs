//! Benchmarks for the bucketizing hot path.
//!
//! Scoring is O(buckets) per email, so throughput depends on how many
//! buckets a corpus produces. The synthetic mailbox mixes a handful of
//! near-duplicate spam templates with unique ham so both the join path and
//! the found-new-bucket path get exercised.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use graymail_engine::SpamFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const FILLER: &[&str] = &[
    "schedule", "meeting", "report", "quarterly", "numbers", "deadline", "project", "update",
    "invoice", "attached", "review", "draft", "budget", "travel", "office", "lunch", "notes",
    "agenda", "summary", "feedback", "release", "testing", "deploy", "metrics", "planning",
];

const SPAM_TEMPLATES: &[&str] = &[
    "congratulations you have won a fabulous prize claim it before midnight tonight",
    "act now to refinance your loan at an unbelievable introductory rate",
    "exclusive offer for valued customers buy one get three absolutely free",
];

fn synthetic_email(rng: &mut StdRng) -> String {
    // Roughly half the mailbox is near-duplicate spam, the rest unique ham.
    let body = if rng.gen_bool(0.5) {
        let template = SPAM_TEMPLATES[rng.gen_range(0..SPAM_TEMPLATES.len())];
        let extra = FILLER[rng.gen_range(0..FILLER.len())];
        format!("{template} {extra}")
    } else {
        let count = rng.gen_range(8..20);
        let words: Vec<&str> = (0..count)
            .map(|_| FILLER[rng.gen_range(0..FILLER.len())])
            .collect();
        words.join(" ")
    };
    format!("header:\nBenchmark corpus\n\n{body}")
}

fn bucketize_mailbox(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let emails: Vec<String> = (0..200).map(|_| synthetic_email(&mut rng)).collect();

    c.bench_function("bucketize_200_emails", |b| {
        b.iter_batched(
            || emails.clone(),
            |emails| {
                let mut filter = SpamFilter::new();
                filter.reset(70.0, 5);
                for raw in &emails {
                    black_box(filter.score_email(raw));
                }
                black_box(filter.bucket_count())
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("score_against_populated_store", |b| {
        let mut filter = SpamFilter::new();
        filter.reset(70.0, 5);
        for raw in &emails {
            filter.score_email(raw);
        }
        let probe = synthetic_email(&mut rng);

        b.iter_batched(
            || filter.clone(),
            |mut filter| black_box(filter.score_email(&probe)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bucketize_mailbox);
criterion_main!(benches);
