use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::gemini;

use crate::domain::{ports::CompletionService, DomainError};
use crate::infrastructure::config::LlmConfig;

/// Gemini completion adapter.
///
/// Model id and system instruction are fixed at construction. Each call is a
/// single attempt: no retries, no timeout; callers wanting either wrap this
/// boundary.
pub struct GeminiLlm {
    client: gemini::Client,
    model: String,
    system_instruction: String,
}

impl GeminiLlm {
    pub fn new(model: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            client: gemini::Client::from_env(),
            model: model.into(),
            system_instruction: system_instruction.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.model, &config.system_instruction)
    }
}

#[async_trait]
impl CompletionService for GeminiLlm {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(&self.system_instruction)
            .build();

        let reply = agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::generation(e.to_string()))?;

        Ok(reply.trim().to_string())
    }
}
