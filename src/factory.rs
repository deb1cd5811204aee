use crate::catalog;
use crate::error::FactoryError;
use crate::llm::Generator;
use crate::merge;
use crate::prompt;
use crate::question::QuestionRecord;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub subject: String,
    /// File name including the extension.
    pub topic_file: String,
    pub extension: String,
    pub use_images: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub existing: usize,
    pub generated: usize,
    pub path: PathBuf,
}

/// One generation run for one topic file: prompt, call, merge, write.
/// The file at `path` is untouched unless the model output decodes.
pub fn generate_topic(
    generator: &dyn Generator,
    request: &GenerationRequest,
    path: &Path,
    existing: &[QuestionRecord],
) -> Result<GenerationOutcome, FactoryError> {
    let topic = catalog::topic_stem(&request.topic_file, &request.extension);
    let prompt = prompt::build(
        &request.subject,
        topic,
        request.use_images,
        existing,
        request.count,
    )?;

    info!(subject = %request.subject, topic, count = request.count, "generating questions");
    let raw = generator.generate(&prompt)?;
    let generated = merge::merge_and_write(path, existing, &raw)?;

    Ok(GenerationOutcome {
        existing: existing.len(),
        generated,
        path: path.to_path_buf(),
    })
}
