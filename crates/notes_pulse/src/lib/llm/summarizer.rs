use std::{fmt::Display, future::Future};

/// Raw LLM completion boundary: instructions plus content in, generated text out.
///
/// Implementations make a single attempt; retrying on rate limits is layered on
/// top by [`SummarizerClient`](crate::SummarizerClient).
pub trait Summarizer {
    type Error: CompletionError;

    fn model_name(&self) -> &str;

    fn complete(
        &self,
        instructions: &str,
        content: &str,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}

impl<S: Summarizer> Summarizer for &S {
    type Error = S::Error;

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    async fn complete(&self, instructions: &str, content: &str) -> Result<String, Self::Error> {
        (**self).complete(instructions, content).await
    }
}

pub trait CompletionError: Display {
    /// Whether the failure is a transient rate-limit / quota condition worth retrying.
    fn is_rate_limited(&self) -> bool;
}

/// Heuristic used when only an error message is available.
pub fn looks_rate_limited(message: &str) -> bool {
    message.contains("429") || message.to_lowercase().contains("quota")
}

impl CompletionError for anyhow::Error {
    fn is_rate_limited(&self) -> bool {
        looks_rate_limited(&format!("{self:#}"))
    }
}
