use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, KnowledgeSource},
    DomainError, Embedding, TextUnit,
};
use async_trait::async_trait;

/// Sentinel returned when a ranking query runs against an empty index.
/// Unreachable under the construction invariants, kept as a defensive check.
pub const NO_MATCH_MESSAGE: &str = "No relevant information was found in the document.";

/// Whole-document knowledge source: the context block is the stored text,
/// verbatim, for every question.
pub struct InlineText {
    text: String,
}

impl InlineText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl KnowledgeSource for InlineText {
    async fn context_for(&self, _question: &str) -> Result<String, DomainError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("inline text ({} chars)", self.text.len())
    }
}

/// Text units with their embeddings, index-aligned.
///
/// Built once at session construction and read-only afterward. Lookup is a
/// linear scan over all embeddings, O(n) per query.
#[derive(Debug)]
pub struct FragmentIndex {
    units: Vec<TextUnit>,
    embeddings: Vec<Embedding>,
}

impl FragmentIndex {
    /// Embeds every unit with the given service and stores the pair.
    #[instrument(skip(units, embedding), fields(count = units.len()))]
    pub async fn build(
        units: Vec<TextUnit>,
        embedding: &dyn EmbeddingService,
    ) -> Result<Self, DomainError> {
        if units.is_empty() {
            return Err(DomainError::empty_corpus("cannot index zero text units"));
        }

        let texts: Vec<&str> = units.iter().map(|u| u.content.as_str()).collect();
        let embeddings = embedding.embed_batch(&texts).await?;

        if embeddings.len() != units.len() {
            return Err(DomainError::internal(format!(
                "embedding count {} does not match unit count {}",
                embeddings.len(),
                units.len()
            )));
        }

        Ok(Self { units, embeddings })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit whose embedding has highest cosine similarity to the query.
    ///
    /// Stable argmax: on ties the first index achieving the maximum wins.
    pub fn best_match(&self, query: &Embedding) -> Option<&TextUnit> {
        let mut best: Option<(usize, f32)> = None;

        for (i, embedding) in self.embeddings.iter().enumerate() {
            let score = query.cosine_similarity(embedding);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((i, score)),
            }
        }

        best.map(|(i, _)| &self.units[i])
    }
}

/// Page-ranked knowledge source: embeds the question and returns the text of
/// the single most similar page.
pub struct PdfCorpus {
    index: FragmentIndex,
    embedding: Arc<dyn EmbeddingService>,
}

impl PdfCorpus {
    pub fn new(index: FragmentIndex, embedding: Arc<dyn EmbeddingService>) -> Self {
        Self { index, embedding }
    }
}

#[async_trait]
impl KnowledgeSource for PdfCorpus {
    #[instrument(skip(self, question))]
    async fn context_for(&self, question: &str) -> Result<String, DomainError> {
        let query = self.embedding.embed(question).await?;

        Ok(self
            .index
            .best_match(&query)
            .map(|unit| unit.content.clone())
            .unwrap_or_else(|| NO_MATCH_MESSAGE.to_string()))
    }

    fn describe(&self) -> String {
        format!("pdf corpus ({} fragments)", self.index.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Returns a fixed vector per known text; unknown texts get the zero
    /// vector so they never win a ranking.
    struct StaticEmbedding {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl StaticEmbedding {
        fn new(entries: &[(&str, Vec<f32>)]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingService for StaticEmbedding {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            Ok(Embedding::new(
                self.vectors.get(text).cloned().unwrap_or(vec![0.0, 0.0]),
            ))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_build_rejects_empty_corpus() {
        let embedding = StaticEmbedding::new(&[]);
        let err = FragmentIndex::build(Vec::new(), &embedding)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyCorpus(_)));
    }

    #[tokio::test]
    async fn test_build_aligns_embeddings_with_units() {
        let embedding = StaticEmbedding::new(&[
            ("ladders", vec![1.0, 0.0]),
            ("forklifts", vec![0.0, 1.0]),
        ]);
        let units = vec![TextUnit::page("ladders", 1), TextUnit::page("forklifts", 2)];

        let index = FragmentIndex::build(units, &embedding).await.unwrap();
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_best_match_returns_engineered_unit() {
        let embedding = StaticEmbedding::new(&[
            ("noise limits", vec![1.0, 0.0]),
            ("lathe operation", vec![0.0, 1.0]),
            ("who runs the lathe", vec![0.0, 1.0]),
        ]);
        let units = vec![
            TextUnit::page("noise limits", 1),
            TextUnit::page("lathe operation", 2),
        ];
        let index = FragmentIndex::build(units, &embedding).await.unwrap();

        let query = embedding.embed("who runs the lathe").await.unwrap();
        let unit = index.best_match(&query).unwrap();
        assert_eq!(unit.content, "lathe operation");
        assert_eq!(unit.page, Some(2));
    }

    #[tokio::test]
    async fn test_best_match_tie_break_is_first_index() {
        let embedding = StaticEmbedding::new(&[
            ("first page", vec![1.0, 0.0]),
            ("second page", vec![1.0, 0.0]),
        ]);
        let units = vec![
            TextUnit::page("first page", 1),
            TextUnit::page("second page", 2),
        ];
        let index = FragmentIndex::build(units, &embedding).await.unwrap();

        let unit = index.best_match(&Embedding::new(vec![1.0, 0.0])).unwrap();
        assert_eq!(unit.content, "first page");
    }

    #[tokio::test]
    async fn test_pdf_corpus_returns_best_fragment_text() {
        let embedding = Arc::new(StaticEmbedding::new(&[
            ("emergency exits", vec![1.0, 0.0]),
            ("hearing protection", vec![0.0, 1.0]),
            ("what about ear protection?", vec![0.0, 1.0]),
        ]));
        let units = vec![
            TextUnit::page("emergency exits", 1),
            TextUnit::page("hearing protection", 2),
        ];
        let index = FragmentIndex::build(units, embedding.as_ref()).await.unwrap();
        let corpus = PdfCorpus::new(index, embedding);

        let context = corpus
            .context_for("what about ear protection?")
            .await
            .unwrap();
        assert_eq!(context, "hearing protection");
    }

    #[tokio::test]
    async fn test_inline_text_is_verbatim() {
        let source = InlineText::new("Only trained staff may operate heavy machinery.");
        let context = source.context_for("anything").await.unwrap();
        assert_eq!(context, "Only trained staff may operate heavy machinery.");
    }
}
