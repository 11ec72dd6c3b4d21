// Tests for building the repository URL index

use repolinks_core::{RepositoryRecord, RepositoryUrlIndex, Structure, UNKNOWN_REPOSITORY, build_index};
use serde_json::json;

fn record(name: Option<&str>, structure: Option<serde_json::Value>) -> RepositoryRecord {
    RepositoryRecord::new(name.map(String::from), structure.map(Structure::from))
}

// ============================================================================
// Record Tests
// ============================================================================

#[test]
fn test_record_defaults_name_to_unknown() {
    let record = RepositoryRecord::new(None, None);
    assert_eq!(record.name, UNKNOWN_REPOSITORY);
    assert_eq!(record.name, "Unknown");
}

#[test]
fn test_record_keeps_given_name() {
    let record = RepositoryRecord::new(Some("repolinks".to_string()), None);
    assert_eq!(record.name, "repolinks");
}

// ============================================================================
// Index Builder Tests
// ============================================================================

#[test]
fn test_build_index_empty() {
    let index = build_index(Vec::new());
    assert!(index.is_empty());
    assert_eq!(index.total_urls(), 0);
}

#[test]
fn test_build_index_extracts_per_repository() {
    let index = build_index(vec![
        record(Some("alpha"), Some(json!({"docs": ["https://a.com", "https://b.com"]}))),
        record(Some("beta"), Some(json!(["https://c.com", "https://c.com"]))),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.total_urls(), 3);

    let mut alpha = index.get("alpha").unwrap().to_vec();
    alpha.sort();
    assert_eq!(alpha, vec!["https://a.com", "https://b.com"]);
    assert_eq!(index.get("beta").unwrap(), ["https://c.com".to_string()]);
}

#[test]
fn test_build_index_skips_missing_structure() {
    let index = build_index(vec![
        record(Some("no-structure"), None),
        record(Some("with-structure"), Some(json!({"a": "https://a.com"}))),
    ]);

    assert!(!index.contains("no-structure"));
    assert!(index.contains("with-structure"));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_build_index_keeps_present_structure_without_urls() {
    let index = build_index(vec![
        record(Some("empty"), Some(json!({}))),
        record(Some("null"), Some(json!(null))),
    ]);

    assert_eq!(index.get("empty"), Some(&[][..]));
    assert_eq!(index.get("null"), Some(&[][..]));
}

#[test]
fn test_build_index_unnamed_document() {
    let index = build_index(vec![record(None, Some(json!("https://anon.com")))]);
    assert_eq!(index.get("Unknown").unwrap(), ["https://anon.com".to_string()]);
}

#[test]
fn test_build_index_last_write_wins() {
    let index = build_index(vec![
        record(Some("dup"), Some(json!(["https://first.com"]))),
        record(Some("dup"), Some(json!(["https://second.com"]))),
    ]);

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("dup").unwrap(), ["https://second.com".to_string()]);
}

#[test]
fn test_build_index_later_skipped_record_does_not_overwrite() {
    let index = build_index(vec![
        record(Some("dup"), Some(json!(["https://first.com"]))),
        record(Some("dup"), None),
    ]);

    assert_eq!(index.get("dup").unwrap(), ["https://first.com".to_string()]);
}

// ============================================================================
// Index Tests
// ============================================================================

#[test]
fn test_index_insert_returns_replaced_list() {
    let mut index = RepositoryUrlIndex::new();
    assert!(index.insert("a".to_string(), vec!["https://1.com".to_string()]).is_none());

    let previous = index.insert("a".to_string(), vec!["https://2.com".to_string()]);
    assert_eq!(previous, Some(vec!["https://1.com".to_string()]));
}

#[test]
fn test_index_insert_dedups_and_sorts() {
    let mut index = RepositoryUrlIndex::new();
    index.insert(
        "a".to_string(),
        vec![
            "https://b.com".to_string(),
            "https://a.com".to_string(),
            "https://b.com".to_string(),
        ],
    );

    assert_eq!(
        index.get("a").unwrap(),
        ["https://a.com".to_string(), "https://b.com".to_string()]
    );
}

#[test]
fn test_index_iterates_by_name() {
    let mut index = RepositoryUrlIndex::new();
    index.insert("zeta".to_string(), vec![]);
    index.insert("alpha".to_string(), vec![]);
    index.insert("mid".to_string(), vec![]);

    let names: Vec<&str> = index.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_index_serializes_as_plain_mapping() {
    let mut index = RepositoryUrlIndex::new();
    index.insert("repo".to_string(), vec!["https://a.com".to_string()]);

    let value = serde_json::to_value(&index).unwrap();
    assert_eq!(value, json!({"repo": ["https://a.com"]}));
}
