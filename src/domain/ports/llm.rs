use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Hosted text-generation boundary.
///
/// Implementations carry their own model id and system instruction; callers
/// pass the fully composed prompt and get the generated text back.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
