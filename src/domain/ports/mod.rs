mod embedding;
mod knowledge;
mod llm;

pub use embedding::EmbeddingService;
pub use knowledge::KnowledgeSource;
pub use llm::CompletionService;
