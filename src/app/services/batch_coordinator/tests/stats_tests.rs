//! Tests for batch statistics helpers

use crate::app::services::batch_coordinator::BatchStats;

#[test]
fn test_success_rate_empty() {
    let stats = BatchStats::new();
    assert_eq!(stats.success_rate(), 0.0);
    assert!(stats.is_clean());
}

#[test]
fn test_success_rate_partial() {
    let stats = BatchStats {
        records_read: 4,
        records_decoded: 3,
        records_skipped: 1,
        ..Default::default()
    };
    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_clean());
}

#[test]
fn test_skip_helpers_record_messages() {
    let mut stats = BatchStats::new();
    stats.skip_file("bad schema".to_string());
    stats.skip_record("bad line".to_string());

    assert_eq!(stats.schema_files_skipped, 1);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.errors, vec!["bad schema", "bad line"]);
}

#[test]
fn test_failed_submission_is_not_clean() {
    let stats = BatchStats {
        records_read: 1,
        records_decoded: 1,
        submissions_failed: 1,
        ..Default::default()
    };
    assert_eq!(stats.success_rate(), 100.0);
    assert!(!stats.is_clean());
}
