pub mod bootstrap;
pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;

pub use bootstrap::{build_session, KnowledgeSpec};
pub use config::{Config, SYSTEM_INSTRUCTION};
pub use embedding::GeminiEmbedding;
pub use llm::GeminiLlm;
