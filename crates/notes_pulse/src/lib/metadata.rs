use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Facts about one completed summarization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub transcript_chars: usize,
    pub chunk_count: usize,
    pub batch_count: usize,
    pub api_calls_used: usize,
    pub api_calls_max: usize,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
}

impl RunMetadata {
    /// Elapsed wall-clock time rounded to hundredths of a second
    pub fn elapsed_seconds(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 100.0).round() / 100.0
    }
}

fn serialize_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((elapsed.as_secs_f64() * 100.0).round() / 100.0)
}

/// Clock started when a run begins; turns into [`RunMetadata`] once the run is done.
#[derive(Debug)]
pub struct MetadataRecorder {
    started: Instant,
    started_at: DateTime<Utc>,
    transcript_chars: usize,
    api_calls_max: usize,
}

impl MetadataRecorder {
    pub fn start(transcript_chars: usize, api_calls_max: usize) -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            transcript_chars,
            api_calls_max,
        }
    }

    pub fn finish(self, chunk_count: usize, batch_count: usize, api_calls_used: usize) -> RunMetadata {
        RunMetadata {
            transcript_chars: self.transcript_chars,
            chunk_count,
            batch_count,
            api_calls_used,
            api_calls_max: self.api_calls_max,
            elapsed: self.started.elapsed(),
            started_at: self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_carries_counts() {
        let recorder = MetadataRecorder::start(1_000, 8);
        let metadata = recorder.finish(3, 2, 3);

        assert_eq!(metadata.transcript_chars, 1_000);
        assert_eq!(metadata.chunk_count, 3);
        assert_eq!(metadata.batch_count, 2);
        assert_eq!(metadata.api_calls_used, 3);
        assert_eq!(metadata.api_calls_max, 8);
        assert!(metadata.started_at <= Utc::now());
    }

    #[test]
    fn test_serializes_elapsed_as_rounded_seconds() {
        let metadata = RunMetadata {
            transcript_chars: 10,
            chunk_count: 1,
            batch_count: 1,
            api_calls_used: 1,
            api_calls_max: 8,
            elapsed: Duration::from_millis(1_234),
            started_at: Utc::now(),
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["elapsed_seconds"], serde_json::json!(1.23));
        assert_eq!(metadata.elapsed_seconds(), 1.23);
        assert!(value.get("elapsed").is_none());
    }
}
