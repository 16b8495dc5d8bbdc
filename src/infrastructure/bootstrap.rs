use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::application::{ChatSession, FragmentIndex, InlineText, PdfCorpus};
use crate::domain::{
    ports::{CompletionService, EmbeddingService, KnowledgeSource},
    Result,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::embedding::GeminiEmbedding;
use crate::infrastructure::llm::GeminiLlm;
use crate::infrastructure::loader;

/// Which knowledge source to construct the session around.
#[derive(Debug, Clone)]
pub enum KnowledgeSpec {
    InlineText(String),
    PdfDocument(PathBuf),
}

/// Assembles a ready-to-serve session from configuration and a source.
///
/// This is the only place real providers are wired in; construction errors
/// (missing text, embedding faults) propagate and terminate startup. For a
/// PDF source the whole corpus is embedded here, once, so queries only ever
/// embed the question.
pub async fn build_session(config: &Config, source: KnowledgeSpec) -> Result<ChatSession> {
    let llm: Arc<dyn CompletionService> = Arc::new(GeminiLlm::from_config(&config.llm));

    let knowledge: Arc<dyn KnowledgeSource> = match source {
        KnowledgeSpec::InlineText(text) => Arc::new(InlineText::new(text)),
        KnowledgeSpec::PdfDocument(path) => {
            let units = loader::load_pdf(&path)?;
            info!(pages = units.len(), path = %path.display(), "loaded pdf corpus");

            let embedding: Arc<dyn EmbeddingService> =
                Arc::new(GeminiEmbedding::from_config(&config.embedding));
            let index = FragmentIndex::build(units, embedding.as_ref()).await?;

            Arc::new(PdfCorpus::new(index, embedding))
        }
    };

    Ok(ChatSession::new(knowledge, llm))
}
