/// Builds the single prompt string sent to the completion model.
///
/// Four labeled sections in fixed order: context block, rendered chat
/// history, the user's question, and a trailing `Answer:` cue marking where
/// generation should begin. Pure and deterministic: identical inputs always
/// produce an identical string.
pub fn compose(context: &str, transcript: &str, question: &str) -> String {
    format!(
        "Context:\n{context}\n\nChat history:\n{transcript}\n\nUser question: {question}\nAnswer:"
    )
}
