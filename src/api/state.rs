use std::sync::Arc;

use crate::application::ChatSession;
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ChatSession>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(session: ChatSession, config: Config) -> Self {
        Self {
            session: Arc::new(session),
            config: Arc::new(config),
        }
    }
}
