use crate::question::{QuestionRecord, MULTIPLE_CHOICE};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use tracing::debug;

const SYSTEM_TEMPLATE: &str = include_str!("../prompts/system.j2");
const USER_TEMPLATE: &str = include_str!("../prompts/user.j2");

#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// What the model sees of an existing record: enough to spot a repeat.
#[derive(Debug, Serialize, PartialEq)]
pub struct DigestEntry<'a> {
    pub id: &'a str,
    pub question: &'a str,
}

pub fn digest(existing: &[QuestionRecord]) -> Vec<DigestEntry<'_>> {
    existing
        .iter()
        .map(|q| DigestEntry {
            id: &q.id,
            question: &q.question,
        })
        .collect()
}

pub fn build(
    subject: &str,
    topic: &str,
    use_images: bool,
    existing: &[QuestionRecord],
    count: usize,
) -> Result<PromptPair, minijinja::Error> {
    #[derive(Serialize)]
    struct SystemPromptContext {
        fence: &'static str,
        kind: &'static str,
    }

    #[derive(Serialize)]
    struct UserPromptContext<'a> {
        subject: &'a str,
        topic: &'a str,
        use_images: bool,
        digest: String,
        count: usize,
    }

    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("system.j2", SYSTEM_TEMPLATE)?;
    env.add_template("user.j2", USER_TEMPLATE)?;

    let system = env.get_template("system.j2")?.render(SystemPromptContext {
        fence: "```",
        kind: MULTIPLE_CHOICE,
    })?;

    let digest = serde_json::to_string(&digest(existing)).map_err(|e| {
        minijinja::Error::new(minijinja::ErrorKind::BadSerialization, e.to_string())
    })?;

    let user = env.get_template("user.j2")?.render(UserPromptContext {
        subject,
        topic,
        use_images,
        digest,
        count,
    })?;

    debug!(
        system_len = system.len(),
        user_len = user.len(),
        existing = existing.len(),
        "built prompt"
    );

    Ok(PromptPair { system, user })
}
