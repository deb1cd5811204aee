use crate::error::CatalogError;
use std::fs;
use std::path::{Path, PathBuf};

/// Subject directories directly under the data root, sorted by name.
pub fn list_subjects(root: &Path) -> Result<Vec<String>, CatalogError> {
    if !root.is_dir() {
        return Err(CatalogError::NoSubjects(root.to_path_buf()));
    }

    let mut subjects = Vec::new();
    for entry in read_dir(root)? {
        let entry = entry.map_err(|source| io_error(root, source))?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                subjects.push(name.to_string());
            }
        }
    }
    subjects.sort();

    if subjects.is_empty() {
        return Err(CatalogError::NoSubjects(root.to_path_buf()));
    }
    Ok(subjects)
}

/// Topic files in a subject. An empty list is fine: the caller offers a new topic.
pub fn list_topics(root: &Path, subject: &str, extension: &str) -> Result<Vec<String>, CatalogError> {
    let dir = root.join(subject);
    let suffix = format!(".{}", extension);

    let mut topics = Vec::new();
    for entry in read_dir(&dir)? {
        let entry = entry.map_err(|source| io_error(&dir, source))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(&suffix) {
                topics.push(name.to_string());
            }
        }
    }
    topics.sort();
    Ok(topics)
}

/// Trims the name and appends the extension unless it is already there.
pub fn normalize_topic_name(name: &str, extension: &str) -> String {
    let name = name.trim();
    let suffix = format!(".{}", extension);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

pub fn topic_stem<'a>(filename: &'a str, extension: &str) -> &'a str {
    filename
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(filename)
}

pub fn topic_path(root: &Path, subject: &str, filename: &str) -> PathBuf {
    root.join(subject).join(filename)
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, CatalogError> {
    fs::read_dir(dir).map_err(|source| io_error(dir, source))
}

fn io_error(path: &Path, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.to_path_buf(),
        source,
    }
}
