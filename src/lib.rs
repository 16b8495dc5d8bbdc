//! Retrieval-augmented question answering over a single safety document.
//!
//! A session is built from one knowledge source (inline text or a PDF whose
//! pages are ranked by embedding similarity) and answers questions through a
//! hosted Gemini completion model, keeping the conversation history in
//! memory for the lifetime of the session.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
