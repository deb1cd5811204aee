use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "~/.iller5/config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding one folder per subject.
    pub data_root: String,
    /// Topic file extension, without the leading dot.
    pub extension: String,
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Number of new records requested per call.
    pub count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            extension: "yaml".to_string(),
            provider: "openai".to_string(),
            model: "gpt-5-mini".to_string(),
            temperature: 0.7,
            max_tokens: 8192,
            count: 5,
        }
    }
}

pub fn load() -> Result<Config> {
    let expanded_config_path = shellexpand::tilde(CONFIG_PATH);
    load_from(Path::new(expanded_config_path.as_ref()))
}

pub fn load_from(config_path: &Path) -> Result<Config> {
    let config: Config = if config_path.exists() {
        let file_contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        if file_contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&file_contents)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?
        }
    } else {
        Config::default()
    };

    ensure!(
        config.count > 0,
        "Invalid config file {}: count must be at least 1",
        config_path.display()
    );

    let data_root = shellexpand::tilde(&config.data_root).to_string();
    let extension = config.extension.trim_start_matches('.').to_string();

    Ok(Config {
        data_root,
        extension,
        ..config
    })
}
