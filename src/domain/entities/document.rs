use serde::{Deserialize, Serialize};

/// One unit of extracted text: a single PDF page, or the whole document when
/// the source is inline text.
///
/// Units are immutable once produced by the loader; the fragment index
/// references them without modifying them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextUnit {
    pub content: String,
    /// 1-based page number; `None` for inline text.
    pub page: Option<usize>,
}

impl TextUnit {
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page: None,
        }
    }

    pub fn page(content: impl Into<String>, page: usize) -> Self {
        Self {
            content: content.into(),
            page: Some(page),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
