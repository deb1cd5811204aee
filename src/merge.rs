use crate::error::{FactoryError, GenerationParseError};
use crate::question::QuestionRecord;
use crate::store;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

const FENCE: &str = "```";

/// Drops a leading ```` ```yaml ```` line and a trailing ```` ``` ```` the model
/// may wrap its answer in. Anything else is left alone.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        // The info string runs to the end of the opening line.
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

pub fn parse_generated(raw: &str) -> Result<Vec<QuestionRecord>, GenerationParseError> {
    let cleaned = strip_fences(raw);
    if cleaned.is_empty() {
        return Err(GenerationParseError::Empty);
    }
    let records: Option<Vec<QuestionRecord>> =
        serde_yaml::from_str(cleaned).map_err(GenerationParseError::Malformed)?;
    match records {
        Some(records) if !records.is_empty() => Ok(records),
        _ => Err(GenerationParseError::Empty),
    }
}

/// Decodes the model output and, only if that succeeds, rewrites `path` with
/// `existing` followed by the new records. Returns how many were added.
pub fn merge_and_write(
    path: &Path,
    existing: &[QuestionRecord],
    raw: &str,
) -> Result<usize, FactoryError> {
    let generated = parse_generated(raw)?;
    report_suspicious(existing, &generated);

    let mut all = Vec::with_capacity(existing.len() + generated.len());
    all.extend_from_slice(existing);
    all.extend(generated.iter().cloned());

    store::write(path, &all)?;
    info!(
        path = %path.display(),
        existing = existing.len(),
        generated = generated.len(),
        "merged generated questions"
    );
    Ok(generated.len())
}

// Duplicates and multi-answer records are kept; they are only logged.
fn report_suspicious(existing: &[QuestionRecord], generated: &[QuestionRecord]) {
    let mut ids: HashSet<&str> = existing.iter().map(|q| q.id.as_str()).collect();
    let mut questions: HashSet<&str> = existing.iter().map(|q| q.question.as_str()).collect();

    for record in generated {
        if !ids.insert(record.id.as_str()) {
            warn!(id = %record.id, "generated question reuses an existing id");
        }
        if !questions.insert(record.question.as_str()) {
            warn!(id = %record.id, "generated question repeats existing question text");
        }
        if !record.is_well_formed() {
            warn!(
                id = %record.id,
                options = record.options.len(),
                correct = record.correct_count(),
                "generated question does not have exactly one correct option"
            );
        }
    }
}
