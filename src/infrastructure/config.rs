use serde::Deserialize;

use crate::domain::{DomainError, Result};

/// Environment variable holding the single API credential. Both the
/// completion and embedding adapters authenticate with it.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Persona sent as the system instruction on every completion request.
/// Fixed at construction, not runtime-configurable.
pub const SYSTEM_INSTRUCTION: &str = "You are an assistant specialized in industrial safety \
    regulations. Your role is to provide precise and concise answers to user questions. Always \
    base your answers on the safety document provided.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub system_instruction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// The API credential must be present and non-blank; its absence is a
    /// fatal configuration error raised here, before any query can be
    /// attempted. Model ids and the system instruction are fixed defaults.
    pub fn from_env() -> Result<Self> {
        let credential = std::env::var(API_KEY_VAR).unwrap_or_default();
        if credential.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "{API_KEY_VAR} is not set; add it to the environment or a .env file"
            )));
        }

        let mut config = Self::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| DomainError::configuration(format!("invalid SERVER_PORT: {port}")))?;
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                model: "gemini-1.5-flash".to_string(),
                system_instruction: SYSTEM_INSTRUCTION.to_string(),
            },
            embedding: EmbeddingConfig {
                model: "text-embedding-004".to_string(),
                dimension: 768,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}
