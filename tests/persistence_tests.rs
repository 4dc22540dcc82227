//! Plan and rule file round trips through the filesystem.

use glyph_redactor::geometry::Rect;
use glyph_redactor::persistence::plan_to_json;
use glyph_redactor::{
    load_plan, load_rules, save_plan, RedactionPlan, RedactorError, Region, RegexOptions, Rule,
};
use std::fs;
use tempfile::TempDir;

fn sample_plan() -> RedactionPlan {
    RedactionPlan::new(
        "/docs/form.pdf",
        vec![
            Region::new(1, Rect::new(72.0, 650.0, 122.0, 660.0), "1234", "1234", 0),
            Region::new(3, Rect::new(40.5, 100.25, 90.0, 112.0), "ALICE", "(?i)alice", 0),
        ],
    )
}

#[test]
fn test_saved_plan_loads_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");
    let plan = sample_plan();

    save_plan(&plan, &path).unwrap();
    let loaded = load_plan(&path).unwrap();

    assert_eq!(loaded, plan);
    assert_eq!(loaded.total_redactions(), 2);
}

#[test]
fn test_saved_plan_records_total() {
    let json = plan_to_json(&sample_plan()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["totalRedactions"], 2);
    assert_eq!(value["regions"][1]["pageNumber"], 3);
    assert_eq!(value["regions"][1]["rulePattern"], "(?i)alice");
}

#[test]
fn test_missing_plan_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_plan(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
}

#[test]
fn test_corrupt_plan_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");
    fs::write(&path, "{\"sourcePath\": 12").unwrap();

    let err = load_plan(&path).unwrap_err();
    assert!(matches!(err, RedactorError::InvalidPlan { .. }), "got {:?}", err);
    assert!(!err.is_not_found());
}

#[test]
fn test_rules_file_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r#"[
            {"pattern": "1234"},
            {"pattern": "\\d{3}-\\d{2}-\\d{4}", "isRegex": true, "fragmentAware": false},
            {"pattern": "alice", "isRegex": true, "regexOptions": {"caseInsensitive": true}}
        ]"#,
    )
    .unwrap();

    let rules = load_rules(&path).unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0], Rule::literal("1234"));
    assert_eq!(rules[1].fragment_aware, Some(false));
    assert!(rules[1].is_regex);
    assert_eq!(
        rules[2].regex_options,
        Some(RegexOptions {
            case_insensitive: true,
            ..Default::default()
        })
    );
}

#[test]
fn test_malformed_rules_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(&path, r#"{"pattern": "not an array"}"#).unwrap();

    let err = load_rules(&path).unwrap_err();
    assert!(matches!(err, RedactorError::InvalidInput { .. }));
}
