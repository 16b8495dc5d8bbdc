mod conversation;
mod document;
mod embedding;

pub use conversation::{Conversation, Turn};
pub use document::TextUnit;
pub use embedding::Embedding;
