use std::sync::{Arc, Mutex};

use transcript_source::{Transcript, TranscriptEntry, TranscriptError, TranscriptSource, VideoId};

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub entries: Vec<String>,
    pub calls: Arc<Mutex<Vec<VideoId>>>,
    pub fail_with: Option<fn(&VideoId) -> TranscriptError>,
}

impl MockTranscriptSource {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(fail_with: fn(&VideoId) -> TranscriptError) -> Self {
        Self {
            fail_with: Some(fail_with),
            ..Self::new(Vec::<String>::new())
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.clone());

        if let Some(fail_with) = self.fail_with {
            return Err(fail_with(video_id));
        }

        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptEntry {
                text: text.clone(),
                start: i as f64 * 2.0,
                duration: 2.0,
            })
            .collect();

        Ok(Transcript {
            video_id: video_id.clone(),
            language_code: "en".into(),
            is_generated: false,
            entries,
        })
    }
}
