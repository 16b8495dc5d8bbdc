use safety_chat::api::{create_router, AppState};
use safety_chat::infrastructure::{build_session, Config, KnowledgeSpec};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Built-in knowledge source used when no document path is configured.
const DEFAULT_CONTEXT: &str = "\
Safety rules and considerations:
- Only trained and authorized personnel may operate heavy machinery such as lathes.
- Mandatory personal protective equipment includes safety glasses, hearing protection and gloves.
- Always inspect equipment before use and follow the safety procedures.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safety_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let source = match std::env::var("DOCUMENT_PATH") {
        Ok(path) if !path.trim().is_empty() => KnowledgeSpec::PdfDocument(PathBuf::from(path)),
        _ => KnowledgeSpec::InlineText(DEFAULT_CONTEXT.to_string()),
    };

    let session = build_session(&config, source).await?;
    info!(source = %session.source_description(), "chat session initialized");

    let state = AppState::new(session, config.clone());
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
