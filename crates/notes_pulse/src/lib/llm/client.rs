use crate::llm::{
    retry::RetryPolicy,
    summarizer::{CompletionError, Summarizer},
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Quota exceeded after {attempts} attempts: {message}")]
    QuotaExceeded { attempts: u32, message: String },

    #[error("{0}")]
    Upstream(String),
}

/// Wraps a [`Summarizer`] with retry-on-rate-limit.
///
/// Only rate-limit failures are retried; any other failure is returned on the
/// attempt it happened.
#[derive(Debug, Clone)]
pub struct SummarizerClient<S> {
    inner: S,
    retry_policy: RetryPolicy,
}

impl<S: Summarizer> SummarizerClient<S> {
    pub fn new(inner: S, retry_policy: RetryPolicy) -> Self {
        Self {
            inner,
            retry_policy,
        }
    }

    #[tracing::instrument(skip_all, fields(model = %self.inner.model_name(), content_chars = content.chars().count()))]
    pub async fn complete(&self, instructions: &str, content: &str) -> Result<String, ClientError> {
        let mut backoff = self.retry_policy.backoff();

        loop {
            let err = match self.inner.complete(instructions, content).await {
                Ok(text) => return Ok(text),
                Err(e) => e,
            };

            if !err.is_rate_limited() {
                tracing::error!(error = %err, attempt = backoff.attempt(), "Completion failed");
                return Err(ClientError::Upstream(err.to_string()));
            }

            let attempt = backoff.attempt();
            let Some(delay) = backoff.next_delay() else {
                tracing::error!(error = %err, attempts = attempt, "Rate limit persisted after all retries");
                return Err(ClientError::QuotaExceeded {
                    attempts: attempt,
                    message: err.to_string(),
                });
            };

            tracing::warn!(
                error = %err,
                attempt,
                max_attempts = backoff.max_attempts(),
                delay_secs = delay.as_secs_f64(),
                "Rate limit hit, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex, time::Duration};

    use super::*;

    struct Scripted {
        responses: Mutex<VecDeque<anyhow::Result<String>>>,
        calls: Mutex<usize>,
    }

    impl Scripted {
        fn new(responses: Vec<anyhow::Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl Summarizer for Scripted {
        type Error = anyhow::Error;

        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _instructions: &str, _content: &str) -> anyhow::Result<String> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("default".into()))
        }
    }

    fn rate_limited() -> anyhow::Result<String> {
        Err(anyhow::anyhow!("API error: 429 - Resource exhausted"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_rate_limits_with_doubling_backoff() {
        let inner = Scripted::new(vec![rate_limited(), rate_limited(), Ok("done".into())]);
        let client = SummarizerClient::new(&inner, RetryPolicy::default());

        let started = tokio::time::Instant::now();
        let result = client.complete("instructions", "content").await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(inner.calls(), 3);
        // 6s + 12s of virtual time
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(18), "elapsed: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(19), "elapsed: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_exhaustion_is_quota_exceeded() {
        let inner = Scripted::new(vec![rate_limited(), rate_limited(), rate_limited()]);
        let client = SummarizerClient::new(&inner, RetryPolicy::default());

        let result = client.complete("instructions", "content").await;

        assert!(matches!(
            result,
            Err(ClientError::QuotaExceeded { attempts: 3, ref message }) if message.contains("429")
        ));
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_other_failures_are_not_retried() {
        let inner = Scripted::new(vec![Err(anyhow::anyhow!("invalid api key"))]);
        let client = SummarizerClient::new(&inner, RetryPolicy::default());

        let result = client.complete("instructions", "content").await;

        assert!(matches!(result, Err(ClientError::Upstream(ref m)) if m == "invalid api key"));
        assert_eq!(inner.calls(), 1);
    }
}
