//! # Version Ledger Unit Tests
//!
//! Tests for version derivation, ordering and eviction selection.
//!
//! These tests verify:
//! - Stage membership drives the `current` flag
//! - The total order: undated versions first, then dates ascending, hash tie-break
//! - Already-current detection
//! - Eviction victim selection and the history ceiling

use secretsmanager_versioning::constants::MAX_VERSION_COUNT;
use secretsmanager_versioning::ledger::{
    derive_versions, is_already_current, pick_eviction_victim, SecretRecord, SecretVersion,
};
use secretsmanager_versioning::store::RawSecretMetadata;
use std::collections::HashMap;

fn version(hash: &str, current: bool, date: Option<&str>) -> SecretVersion {
    SecretVersion {
        hash: hash.to_string(),
        current,
        commit: Some("c0ffee".to_string()),
        date: date.map(str::to_string),
    }
}

fn stage_map(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(id, stages)| {
            (
                (*id).to_string(),
                stages.iter().map(|s| (*s).to_string()).collect(),
            )
        })
        .collect()
}

fn tag_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn test_derive_versions_marks_current_from_stage_membership() {
    let stages = stage_map(&[
        ("aaa", &["aaa"]),
        ("bbb", &["AWSCURRENT", "bbb"]),
        ("ccc", &["AWSPREVIOUS", "ccc"]),
    ]);

    let versions = derive_versions(&stages, &HashMap::new());
    let current: Vec<&str> = versions
        .iter()
        .filter(|v| v.current)
        .map(|v| v.hash.as_str())
        .collect();

    assert_eq!(current, vec!["bbb"]);
}

#[test]
fn test_derive_versions_sorts_dates_ascending() {
    let stages = stage_map(&[("aaa", &["aaa"]), ("bbb", &["bbb"]), ("ccc", &["ccc"])]);
    let tags = tag_map(&[
        ("version:aaa", "c1/2024-03-01T00:00:00.000Z"),
        ("version:bbb", "c2/2024-01-01T00:00:00.000Z"),
        ("version:ccc", "c3/2024-02-01T00:00:00.000Z"),
    ]);

    let versions = derive_versions(&stages, &tags);
    let order: Vec<&str> = versions.iter().map(|v| v.hash.as_str()).collect();

    assert_eq!(order, vec!["bbb", "ccc", "aaa"]);
}

#[test]
fn test_derive_versions_sorts_undated_before_dated() {
    let stages = stage_map(&[("zzz", &["zzz"]), ("aaa", &["aaa"]), ("mmm", &["mmm"])]);
    let tags = tag_map(&[("version:aaa", "c1/2020-01-01T00:00:00.000Z")]);

    let versions = derive_versions(&stages, &tags);
    let order: Vec<&str> = versions.iter().map(|v| v.hash.as_str()).collect();

    // Untagged versions first, hash-ordered among themselves, then dated ones.
    assert_eq!(order, vec!["mmm", "zzz", "aaa"]);
}

#[test]
fn test_equal_dates_fall_back_to_hash_order() {
    let stages = stage_map(&[("bbb", &["bbb"]), ("aaa", &["aaa"])]);
    let tags = tag_map(&[
        ("version:aaa", "c1/2024-01-01T00:00:00.000Z"),
        ("version:bbb", "c2/2024-01-01T00:00:00.000Z"),
    ]);

    let versions = derive_versions(&stages, &tags);
    let order: Vec<&str> = versions.iter().map(|v| v.hash.as_str()).collect();

    assert_eq!(order, vec!["aaa", "bbb"]);
}

#[test]
fn test_tag_value_splits_on_first_slash_only() {
    let stages = stage_map(&[("aaa", &["aaa"])]);
    let tags = tag_map(&[("version:aaa", "c1/2024/x")]);

    let versions = derive_versions(&stages, &tags);
    assert_eq!(versions[0].commit.as_deref(), Some("c1"));
    assert_eq!(versions[0].date.as_deref(), Some("2024/x"));
}

#[test]
fn test_is_already_current_truth_table() {
    let versions = vec![
        version("old", false, Some("2024-01-01T00:00:00.000Z")),
        version("new", true, Some("2024-02-01T00:00:00.000Z")),
    ];

    // Present and current
    assert!(is_already_current(&versions, "new"));
    // Present but not current
    assert!(!is_already_current(&versions, "old"));
    // Absent
    assert!(!is_already_current(&versions, "missing"));
    // Empty history
    assert!(!is_already_current(&[], "new"));
}

#[test]
fn test_pick_eviction_victim_empty_is_none() {
    assert_eq!(pick_eviction_victim(&[]), None);
}

#[test]
fn test_pick_eviction_victim_is_oldest() {
    let versions = vec![
        version("stray", false, None),
        version("old", false, Some("2024-01-01T00:00:00.000Z")),
        version("new", true, Some("2024-02-01T00:00:00.000Z")),
    ];

    let victim = pick_eviction_victim(&versions).unwrap();
    assert_eq!(victim.hash, "stray");
}

#[test]
fn test_over_ceiling_threshold() {
    let at_ceiling = record_with_versions(MAX_VERSION_COUNT);
    assert!(!at_ceiling.over_ceiling());

    let over_ceiling = record_with_versions(MAX_VERSION_COUNT + 1);
    assert!(over_ceiling.over_ceiling());
}

fn record_with_versions(count: usize) -> SecretRecord {
    let mut metadata = RawSecretMetadata {
        name: "app".to_string(),
        arn: "arn:aws:secretsmanager:eu-central-1:111111111111:secret:app".to_string(),
        ..RawSecretMetadata::default()
    };

    for index in 0..count {
        let hash = format!("{index:032x}");
        metadata
            .version_ids_to_stages
            .insert(hash.clone(), vec![hash.clone()]);
        metadata.tags.insert(
            format!("version:{hash}"),
            format!("c{index}/2024-01-{:02}T00:00:00.000Z", index + 1),
        );
    }

    SecretRecord::from_metadata(&metadata)
}
