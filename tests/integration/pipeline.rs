use crate::{record, yaml_for, StubGenerator};
use iller5_factory::error::{FactoryError, GenerationParseError, IntegrationError};
use iller5_factory::factory::{generate_topic, GenerationRequest};
use iller5_factory::merge::merge_and_write;
use iller5_factory::store;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn biology_with_q1() -> (TempDir, PathBuf) {
    let root = tempdir().unwrap();
    let subject = root.path().join("biology");
    fs::create_dir(&subject).unwrap();
    let path = subject.join("cells.yaml");
    store::write(&path, &[record("q1", "What does the nucleus hold?")]).unwrap();
    (root, path)
}

fn request(count: usize) -> GenerationRequest {
    GenerationRequest {
        subject: "biology".to_string(),
        topic_file: "cells.yaml".to_string(),
        extension: "yaml".to_string(),
        use_images: false,
        count,
    }
}

fn ids(path: &PathBuf) -> Vec<String> {
    store::load(path)
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect()
}

#[test]
fn test_generation_appends_after_existing() {
    let (_root, path) = biology_with_q1();
    let existing = store::load(&path).unwrap();
    let generator = StubGenerator::returning(&yaml_for(&[
        record("q2", "What is a ribosome?"),
        record("q3", "What is a lysosome?"),
    ]));

    let outcome = generate_topic(&generator, &request(2), &path, &existing).unwrap();

    assert_eq!(outcome.existing, 1);
    assert_eq!(outcome.generated, 2);
    assert_eq!(outcome.path, path);
    assert_eq!(ids(&path), vec!["q1", "q2", "q3"]);

    let prompt = generator.seen.borrow().clone().unwrap();
    assert!(prompt.user.contains("Topic: cells\n"));
    assert!(prompt.user.contains("Generate 2 new high-quality questions."));
    assert!(prompt
        .user
        .contains(r#"[{"id":"q1","question":"What does the nucleus hold?"}]"#));
    assert!(!prompt.user.contains("This one is right."));
    assert!(!prompt.user.contains("Explanation for q1."));
}

#[test]
fn test_generation_parse_failure_leaves_file_untouched() {
    let (_root, path) = biology_with_q1();
    let before = fs::read(&path).unwrap();
    let existing = store::load(&path).unwrap();

    let full = yaml_for(&[record("q2", "What is a ribosome?")]);
    let truncated = &full[..full.find("options:").unwrap()];
    let generator = StubGenerator::returning(truncated);

    let err = generate_topic(&generator, &request(5), &path, &existing).unwrap_err();
    assert!(matches!(
        err,
        FactoryError::Parse(GenerationParseError::Malformed(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(ids(&path), vec!["q1"]);
}

#[test]
fn test_integration_failure_leaves_file_untouched() {
    let (_root, path) = biology_with_q1();
    let before = fs::read(&path).unwrap();
    let existing = store::load(&path).unwrap();
    let generator = StubGenerator::failing("429 Too Many Requests");

    let err = generate_topic(&generator, &request(5), &path, &existing).unwrap_err();
    assert!(matches!(
        err,
        FactoryError::Integration(IntegrationError::Request(ref m)) if m.contains("429")
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_new_topic_file_is_created() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("biology")).unwrap();
    let path = root.path().join("biology").join("genetics.yaml");
    let generator = StubGenerator::returning(&format!(
        "```yaml\n{}```",
        yaml_for(&[record("g1", "What is an allele?")])
    ));

    let outcome = generate_topic(&generator, &request(1), &path, &[]).unwrap();
    assert_eq!(outcome.generated, 1);
    assert_eq!(ids(&path), vec!["g1"]);
}

#[test]
fn test_merge_keeps_existing_then_model_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("topic.yaml");
    let existing = vec![record("e2", "E2?"), record("e1", "E1?")];
    let generated = vec![record("n9", "N9?"), record("n1", "N1?"), record("n5", "N5?")];

    let count = merge_and_write(&path, &existing, &yaml_for(&generated)).unwrap();
    assert_eq!(count, 3);

    let stored = store::load(&path).unwrap();
    let expected: Vec<_> = existing.into_iter().chain(generated).collect();
    assert_eq!(stored, expected);
}

#[test]
fn test_merge_persists_duplicates_as_returned() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("topic.yaml");
    let existing = vec![record("q1", "Same?")];

    let count = merge_and_write(&path, &existing, &yaml_for(&[record("q1", "Same?")])).unwrap();
    assert_eq!(count, 1);
    assert_eq!(ids(&path), vec!["q1", "q1"]);
}

#[test]
fn test_merge_empty_response_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("topic.yaml");

    let err = merge_and_write(&path, &[record("q1", "Q?")], "```yaml\n```").unwrap_err();
    assert!(matches!(err, FactoryError::Parse(GenerationParseError::Empty)));
    assert!(!path.exists());
}
