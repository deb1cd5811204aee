use crate::config::Config;
use crate::error::IntegrationError;
use crate::prompt::PromptPair;
use ::llm::{
    builder::{LLMBackend, LLMBuilder},
    chat::ChatMessage,
};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

pub const MOCK_CONTENT_ENV: &str = "MOCK_LLM_CONTENT";

/// Turns a prompt into raw completion text.
pub trait Generator {
    fn generate(&self, prompt: &PromptPair) -> Result<String, IntegrationError>;
}

/// Model-backed generator. The provider API is async; calls block on a private
/// current-thread runtime so callers stay synchronous.
pub struct LlmClient {
    backend: LLMBackend,
    provider_name: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    runtime: Runtime,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, IntegrationError> {
        let provider_name = config.provider.to_ascii_lowercase();
        let (backend, key_env) = match provider_name.as_str() {
            "openai" => (LLMBackend::OpenAI, "OPENAI_API_KEY"),
            "google" => (LLMBackend::Google, "GOOGLE_API_KEY"),
            _ => return Err(IntegrationError::UnknownProvider(config.provider.clone())),
        };

        let api_key = std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| IntegrationError::MissingCredential(key_env.to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(IntegrationError::Runtime)?;

        Ok(Self {
            backend,
            provider_name,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            runtime,
        })
    }
}

impl Generator for LlmClient {
    fn generate(&self, prompt: &PromptPair) -> Result<String, IntegrationError> {
        let llm = LLMBuilder::new()
            .backend(self.backend.clone())
            .api_key(self.api_key.as_str())
            .model(self.model.as_str())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .system(prompt.system.as_str())
            .build()
            .map_err(|e| IntegrationError::Build {
                provider: self.provider_name.clone(),
                message: e.to_string(),
            })?;

        let messages = vec![ChatMessage::user().content(prompt.user.as_str()).build()];

        info!(provider = %self.provider_name, model = %self.model, "requesting completion");
        let response = self
            .runtime
            .block_on(llm.chat(&messages))
            .map_err(|e| {
                warn!(error = %e, "completion request failed");
                IntegrationError::Request(e.to_string())
            })?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => {
                debug!(len = text.len(), "received completion");
                Ok(text)
            }
            _ => Err(IntegrationError::EmptyResponse),
        }
    }
}

/// Returns the same text for every prompt.
pub struct CannedClient {
    content: String,
}

impl CannedClient {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Generator for CannedClient {
    fn generate(&self, _prompt: &PromptPair) -> Result<String, IntegrationError> {
        debug!(len = self.content.len(), "returning canned completion");
        Ok(self.content.clone())
    }
}

/// Canned content from `MOCK_LLM_CONTENT` takes precedence over a real provider.
pub fn client_from_env(config: &Config) -> Result<Box<dyn Generator>, IntegrationError> {
    if let Ok(mock_content) = std::env::var(MOCK_CONTENT_ENV) {
        return Ok(Box::new(CannedClient::new(mock_content)));
    }
    Ok(Box::new(LlmClient::new(config)?))
}
