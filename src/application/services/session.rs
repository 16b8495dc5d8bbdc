use std::sync::{Arc, RwLock};
use tracing::{instrument, warn};

use crate::application::services::prompt;
use crate::domain::{
    ports::{CompletionService, KnowledgeSource},
    Conversation, DomainError,
};

/// Prefix of the displayable message a failed query is converted to.
pub const ERROR_PREFIX: &str = "Error processing request: ";

/// One assistant session: a knowledge source, a completion client and the
/// conversation history accumulated since construction.
///
/// `respond` is the single entry point; per-query failures are downgraded to
/// a displayable string so a fault never terminates the session.
pub struct ChatSession {
    knowledge: Arc<dyn KnowledgeSource>,
    llm: Arc<dyn CompletionService>,
    history: RwLock<Conversation>,
}

impl ChatSession {
    pub fn new(knowledge: Arc<dyn KnowledgeSource>, llm: Arc<dyn CompletionService>) -> Self {
        Self {
            knowledge,
            llm,
            history: RwLock::new(Conversation::new()),
        }
    }

    /// Answers one user question.
    ///
    /// Control flow: context lookup, history render, prompt composition, one
    /// completion call, history append. The turn is appended only after the
    /// completion call succeeds; a failed query leaves history untouched and
    /// returns `ERROR_PREFIX` followed by the cause.
    #[instrument(skip(self, question))]
    pub async fn respond(&self, question: &str) -> String {
        match self.try_respond(question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "query failed");
                format!("{ERROR_PREFIX}{e}")
            }
        }
    }

    async fn try_respond(&self, question: &str) -> Result<String, DomainError> {
        let context = self.knowledge.context_for(question).await?;

        let transcript = self
            .history
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .render();

        let prompt = prompt::compose(&context, &transcript, question);
        let answer = self.llm.generate(&prompt).await?;

        self.history
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .push_turn(question, &answer);

        Ok(answer)
    }

    pub fn transcript(&self) -> Result<String, DomainError> {
        self.history
            .read()
            .map(|h| h.render())
            .map_err(|e| DomainError::internal(e.to_string()))
    }

    pub fn turn_count(&self) -> Result<usize, DomainError> {
        self.history
            .read()
            .map(|h| h.len())
            .map_err(|e| DomainError::internal(e.to_string()))
    }

    pub fn source_description(&self) -> String {
        self.knowledge.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::knowledge::InlineText;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubCompletion {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubCompletion {
        fn answering(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionService for StubCompletion {
        async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(DomainError::generation("quota exceeded")),
            }
        }
    }

    fn session_with(llm: Arc<StubCompletion>) -> ChatSession {
        ChatSession::new(
            Arc::new(InlineText::new(
                "Only trained staff may operate heavy machinery.",
            )),
            llm,
        )
    }

    #[tokio::test]
    async fn test_successful_query_appends_one_turn() {
        let llm = Arc::new(StubCompletion::answering("Only trained staff."));
        let session = session_with(llm.clone());

        let answer = session.respond("Who can operate a lathe?").await;

        assert_eq!(answer, "Only trained staff.");
        assert_eq!(session.turn_count().unwrap(), 1);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            session.transcript().unwrap(),
            "User: Who can operate a lathe?\nAssistant: Only trained staff."
        );
    }

    #[tokio::test]
    async fn test_failed_query_returns_error_string_without_appending() {
        let session = session_with(Arc::new(StubCompletion::failing()));

        let answer = session.respond("Who can operate a lathe?").await;

        assert!(answer.starts_with(ERROR_PREFIX));
        assert!(answer.contains("quota exceeded"));
        assert_eq!(session.turn_count().unwrap(), 0);
        assert_eq!(session.transcript().unwrap(), "");
    }

    #[tokio::test]
    async fn test_session_stays_usable_after_failure() {
        // Fails on the first call, answers normally afterwards.
        struct FlakyCompletion {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl CompletionService for FlakyCompletion {
            async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(DomainError::generation("service unavailable"))
                } else {
                    Ok("Yes.".to_string())
                }
            }
        }

        let session = ChatSession::new(
            Arc::new(InlineText::new("ctx")),
            Arc::new(FlakyCompletion {
                calls: AtomicUsize::new(0),
            }),
        );

        let first = session.respond("first").await;
        assert!(first.starts_with(ERROR_PREFIX));
        assert_eq!(session.turn_count().unwrap(), 0);

        let second = session.respond("second").await;
        assert_eq!(second, "Yes.");
        assert_eq!(session.turn_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_history_feeds_the_next_prompt() {
        struct EchoPrompt;

        #[async_trait]
        impl CompletionService for EchoPrompt {
            async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
                Ok(prompt.to_string())
            }
        }

        let session = ChatSession::new(
            Arc::new(InlineText::new("ctx")),
            Arc::new(EchoPrompt),
        );

        let first = session.respond("one").await;
        assert!(first.contains("Chat history:\n\n"));

        let second = session.respond("two").await;
        assert!(second.contains("User: one\nAssistant:"));
        assert!(second.ends_with("User question: two\nAnswer:"));
    }
}
