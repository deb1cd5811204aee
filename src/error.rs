use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No subjects found in {}. Create a folder first.", .0.display())]
    NoSubjects(PathBuf),

    #[error("Failed to list {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Could not parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to encode questions: {0}")]
    Encode(#[source] serde_yaml::Error),
}

/// Failures talking to the model service.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("{0} not set.")]
    MissingCredential(String),

    #[error("Unknown provider '{0}'. Expected 'openai' or 'google'.")]
    UnknownProvider(String),

    #[error("Failed to build LLM ({provider}): {message}")]
    Build { provider: String, message: String },

    #[error("Chat error: {0}")]
    Request(String),

    #[error("The model returned an empty response.")]
    EmptyResponse,

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum GenerationParseError {
    #[error("Could not parse generated questions: {0}")]
    Malformed(#[source] serde_yaml::Error),

    #[error("No questions generated/parsed.")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a number.")]
    NotANumber(String),

    #[error("{value} is out of range. Pick a number between 1 and {max}.")]
    OutOfRange { value: String, max: usize },
}

/// Everything that can end a generation run.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error(transparent)]
    Parse(#[from] GenerationParseError),

    #[error("Failed to render prompt: {0}")]
    Prompt(#[from] minijinja::Error),
}
