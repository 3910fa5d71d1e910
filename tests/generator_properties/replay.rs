//! Seed replay
//!
//! A run is reproduced exactly from its reported seed.

use crate::*;
use voltest::{Harness, HarnessOptions};

#[test]
fn test_same_seed_same_descriptors() {
    let mut a = source(2024, Limits::default());
    let mut b = source(a.seed(), Limits::default());
    for rank in 0..10 {
        assert_eq!(a.generate_type(None).unwrap(), b.generate_type(None).unwrap());
        assert_eq!(
            a.generate_shape(rank, None).unwrap(),
            b.generate_shape(rank, None).unwrap()
        );
    }
}

#[test]
fn test_clock_seed_is_replayable() {
    let mut first = SchemaSource::builder().build().unwrap();
    let mut replay = source(first.seed(), Limits::default());
    assert_eq!(
        first.generate_type(None).unwrap(),
        replay.generate_type(None).unwrap()
    );
}

#[test]
fn test_harness_report_replays() {
    let run = |seed| {
        Harness::with_default_groups(HarnessOptions::new().seed(seed).iterations(15))
            .unwrap()
            .run()
    };
    let report = run(31);
    assert!(report.passed(), "{}", report.summary());
    assert_eq!(run(report.seed), report);
}
