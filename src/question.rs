use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

pub const MULTIPLE_CHOICE: &str = "multiple_choice";

// Field order here is the order written to disk. Keys outside the schema
// are kept in `extra` and written after the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub question: String,
    #[serde(default)]
    pub image: Option<String>,
    pub options: Vec<QuestionOption>,
    pub explanation: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub correct: bool,
    pub feedback: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl QuestionRecord {
    /// Number of options marked correct.
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }

    /// Exactly one correct option and at least two options overall.
    /// Nothing rejects a record that fails this; callers only report it.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.correct_count() == 1
    }
}
