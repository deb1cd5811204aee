use crate::record;
use iller5_factory::error::StoreError;
use iller5_factory::merge::merge_and_write;
use iller5_factory::store;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(store::load(&path).unwrap().is_empty());

    let loaded = store::load_or_empty(&path);
    assert!(loaded.records.is_empty());
    assert!(loaded.warning.is_none());
}

#[test]
fn test_load_empty_and_null_documents() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.yaml");
    let null = dir.path().join("null.yaml");
    fs::write(&empty, "").unwrap();
    fs::write(&null, "null\n").unwrap();

    assert!(store::load(&empty).unwrap().is_empty());
    assert!(store::load(&null).unwrap().is_empty());
}

#[test]
fn test_load_malformed_file_reports_and_continues() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "- id: q1\n  question: [unterminated\n").unwrap();

    let err = store::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));

    let loaded = store::load_or_empty(&path);
    assert!(loaded.records.is_empty());
    assert!(matches!(loaded.warning, Some(StoreError::Malformed { .. })));
}

#[test]
fn test_load_wrong_shape_is_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mapping.yaml");
    fs::write(&path, "title: not a list of questions\n").unwrap();

    assert!(matches!(
        store::load(&path),
        Err(StoreError::Malformed { .. })
    ));
}

#[test]
fn test_write_then_load_preserves_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.yaml");
    let records = vec![
        record("q3", "Third?"),
        record("q1", "First?"),
        record("q2", "Second?"),
    ];

    store::write(&path, &records).unwrap();
    let loaded = store::load(&path).unwrap();
    assert_eq!(loaded, records);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("- id: q3\n  type: multiple_choice\n  tags:\n"));
}

#[test]
fn test_rewrite_keeps_keys_outside_the_schema() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cells.yaml");
    fs::write(
        &path,
        r#"- id: q1
  type: multiple_choice
  tags: [Cells]
  question: What does the nucleus hold?
  image: null
  options:
    - text: DNA
      correct: true
      feedback: Chromatin lives there.
      hint: Think genetics.
    - text: Ribosomes only
      correct: false
      feedback: Those are mostly cytoplasmic.
  explanation: The nucleus stores the genome.
  difficulty: hard
"#,
    )
    .unwrap();

    let existing = store::load(&path).unwrap();
    assert_eq!(
        existing[0].extra.get("difficulty").and_then(|v| v.as_str()),
        Some("hard")
    );

    let generated = serde_yaml::to_string(&[record("q2", "What is a ribosome?")]).unwrap();
    merge_and_write(&path, &existing, &generated).unwrap();

    let reloaded = store::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0], existing[0]);
    assert_eq!(
        reloaded[0].options[0].extra.get("hint").and_then(|v| v.as_str()),
        Some("Think genetics.")
    );
    assert!(reloaded[1].extra.is_empty());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("  difficulty: hard\n"));
    assert!(text.contains("explanation: The nucleus stores the genome.\n  difficulty: hard\n"));
}
