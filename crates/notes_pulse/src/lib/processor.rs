use serde::Serialize;
use transcript_source::{TranscriptSource, VideoId};

use crate::{Error, FailureKind, HierarchicalSummarizer, RunMetadata, StructuredSummary, Summarizer};

pub mod builder;

/// Everything produced for one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoNotes {
    pub video_id: VideoId,
    pub thumbnail_url: String,
    pub language_code: String,
    pub is_generated_transcript: bool,
    pub summary: StructuredSummary,
    pub metadata: RunMetadata,
}

/// Result of one run as seen by the user: notes, or a single categorized message.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(Box<VideoNotes>),
    Failed { kind: FailureKind, message: String },
}

// Fetches a video's transcript and turns it into notes within the call budget
#[derive(Debug)]
pub struct VideoNotesProcessor<T, S>
where
    T: TranscriptSource + Send + Sync,
    S: Summarizer,
{
    transcript_source: T,
    summarizer: HierarchicalSummarizer<S>,
}

impl<T, S> VideoNotesProcessor<T, S>
where
    T: TranscriptSource + Send + Sync,
    S: Summarizer,
{
    pub fn new(transcript_source: T, summarizer: HierarchicalSummarizer<S>) -> Self {
        VideoNotesProcessor {
            transcript_source,
            summarizer,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, video_ref: &str) -> Result<VideoNotes, Error> {
        let video_id = VideoId::parse(video_ref)?;

        let transcript = self
            .transcript_source
            .fetch_transcript(&video_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %video_id, "Failed to fetch transcript"))?;
        tracing::info!(
            %video_id,
            language = %transcript.language_code,
            generated = transcript.is_generated,
            entries = transcript.entries.len(),
            "Transcript fetched"
        );

        if transcript.is_empty() {
            return Err(Error::Input(format!("Transcript for video {video_id} is empty")));
        }

        let report = self.summarizer.summarize(&transcript.text()).await?;

        Ok(VideoNotes {
            thumbnail_url: video_id.thumbnail_url(),
            video_id,
            language_code: transcript.language_code,
            is_generated_transcript: transcript.is_generated,
            summary: report.summary,
            metadata: report.metadata,
        })
    }

    /// Runs the whole pipeline and folds any failure into one user-facing message.
    /// Partial progress of a failed run is discarded.
    pub async fn process(&self, video_ref: &str) -> RunOutcome {
        match self.run(video_ref).await {
            Ok(notes) => RunOutcome::Completed(Box::new(notes)),
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind(), "Run failed");
                RunOutcome::Failed {
                    kind: e.kind(),
                    message: e.user_message(),
                }
            }
        }
    }
}
