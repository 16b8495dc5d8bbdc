use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// A knowledge source the session grounds its answers in.
///
/// Two variants exist: inline text, which returns the whole document
/// regardless of the question, and a PDF corpus, which selects the most
/// relevant fragment for the question.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Context block to place at the top of the prompt for this question.
    async fn context_for(&self, question: &str) -> Result<String, DomainError>;

    /// Short human-readable description for logs and readiness checks.
    fn describe(&self) -> String;
}
