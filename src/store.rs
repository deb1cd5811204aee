use crate::error::StoreError;
use crate::question::QuestionRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Records read from a topic file, plus the reason they were discarded if they were.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<QuestionRecord>,
    pub warning: Option<StoreError>,
}

/// Reads a topic file. A missing or empty file is an empty topic.
pub fn load(path: &Path) -> Result<Vec<QuestionRecord>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "topic file does not exist yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Option<Vec<QuestionRecord>> =
        serde_yaml::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.unwrap_or_default())
}

/// Like [`load`], but an unreadable file becomes an empty set so generation can go on.
/// Whatever was in the file is lost on the next write.
pub fn load_or_empty(path: &Path) -> LoadedRecords {
    match load(path) {
        Ok(records) => LoadedRecords {
            records,
            warning: None,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "discarding unreadable topic file");
            LoadedRecords {
                records: Vec::new(),
                warning: Some(e),
            }
        }
    }
}

/// Overwrites the topic file with the full sequence.
pub fn write(path: &Path, records: &[QuestionRecord]) -> Result<(), StoreError> {
    let encoded = serde_yaml::to_string(records).map_err(StoreError::Encode)?;
    fs::write(path, encoded).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = records.len(), "wrote topic file");
    Ok(())
}
