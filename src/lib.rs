use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod factory;
pub mod llm;
pub mod merge;
pub mod prompt;
pub mod question;
pub mod store;

use cli::Console;
use config::Config;
use error::FactoryError;
use factory::GenerationRequest;

const NEW_TOPIC: &str = "[New Topic]";

pub fn run() -> anyhow::Result<()> {
    let _cli = cli::Cli::parse();
    let config = config::load()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    session(&config, &mut console)
}

/// One interactive generation run. Returns `Err` only for the startup failures
/// that warrant an abnormal exit; everything after subject discovery is
/// reported on the console.
pub fn session<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    console.say("--- Iller5 Content Factory ---")?;

    let root = Path::new(&config.data_root);
    let subjects = catalog::list_subjects(root)?;

    let generator = match llm::client_from_env(config) {
        Ok(generator) => generator,
        Err(e) => {
            console.say(&format!("Error: {}", e))?;
            return Ok(());
        }
    };

    console.say("\nSubjects:")?;
    let Some(subject_idx) = console.select("\nSelect Subject (Number): ", &subjects)? else {
        return aborted(console);
    };
    let subject = &subjects[subject_idx];

    let topics = match catalog::list_topics(root, subject, &config.extension) {
        Ok(topics) => topics,
        Err(e) => {
            console.say(&format!("Error: {}", e))?;
            return Ok(());
        }
    };
    console.say(&format!("\nTopics in {}:", subject))?;
    let mut menu = topics.clone();
    menu.push(NEW_TOPIC.to_string());
    let Some(topic_idx) = console.select("\nSelect Topic (Number): ", &menu)? else {
        return aborted(console);
    };

    let topic_file = if topic_idx == topics.len() {
        let Some(name) = console.ask_valid(
            "Enter new topic name (e.g. 'pharmacology'): ",
            validate_topic_name,
        )?
        else {
            return aborted(console);
        };
        catalog::normalize_topic_name(&name, &config.extension)
    } else {
        topics[topic_idx].clone()
    };

    let path = catalog::topic_path(root, subject, &topic_file);
    let loaded = store::load_or_empty(&path);
    if let Some(warning) = &loaded.warning {
        console.say(&format!(
            "Warning: {}. Existing content will be replaced on save.",
            warning
        ))?;
    }
    console.say(&format!(
        "Loaded {} existing questions.",
        loaded.records.len()
    ))?;

    let Some(use_images) = console.confirm("Generate Image-based questions? (y/N): ")? else {
        return aborted(console);
    };

    let request = GenerationRequest {
        subject: subject.clone(),
        topic_file,
        extension: config.extension.clone(),
        use_images,
        count: config.count,
    };

    console.say(&format!("\nContacting {} ({})...", config.provider, config.model))?;
    match factory::generate_topic(generator.as_ref(), &request, &path, &loaded.records) {
        Ok(outcome) => {
            console.say(&format!("\nGenerated {} questions.", outcome.generated))?;
            console.say(&format!("Saved to {}", outcome.path.display()))?;
        }
        Err(FactoryError::Parse(e)) => {
            console.say(&format!("Error: {}", e))?;
        }
        Err(e) => {
            console.say(&format!("Error during generation: {}", e))?;
        }
    }
    Ok(())
}

fn validate_topic_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Topic name cannot be empty.".to_string());
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err("Topic name cannot contain path separators.".to_string());
    }
    Ok(())
}

fn aborted<R: BufRead, W: Write>(console: &mut Console<R, W>) -> anyhow::Result<()> {
    console.say("No input; nothing generated.")?;
    Ok(())
}
