use std::future::Future;

use crate::{Transcript, TranscriptError, VideoId};

pub mod youtube;

pub trait TranscriptSource {
    fn fetch_transcript(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;
}

impl<T: TranscriptSource + Send + Sync> TranscriptSource for &T {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        (**self).fetch_transcript(video_id).await
    }
}

/// Order in which caption tracks are tried.
///
/// Manually created tracks are tried first, then auto-generated ones, then any
/// track (of either kind) whose language is in `fallback`.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    pub manual: Vec<String>,
    pub generated: Vec<String>,
    pub fallback: Vec<String>,
}

impl Default for LanguagePreference {
    fn default() -> Self {
        let owned = |langs: &[&str]| langs.iter().map(|l| l.to_string()).collect::<Vec<_>>();

        Self {
            manual: owned(&["en-IN", "en-US", "en-GB", "en"]),
            generated: owned(&["en", "hi"]),
            fallback: owned(&["en", "en-IN", "en-US", "en-GB", "hi"]),
        }
    }
}
