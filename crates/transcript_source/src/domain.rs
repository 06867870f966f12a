use std::{fmt, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::TranscriptError;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[?&]v=|youtu\.be/|/shorts/|/embed/|/live/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
        .unwrap()
});

static BARE_VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// An 11 character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";
    const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

    /// Extracts the video id from a full link (`watch?v=`, `youtu.be/`, `shorts/`,
    /// `embed/`, `live/`) or accepts a bare id.
    pub fn parse(reference: &str) -> Result<Self, TranscriptError> {
        let reference = reference.trim();

        if BARE_VIDEO_ID_RE.is_match(reference) {
            return Ok(VideoId(reference.to_string()));
        }

        VIDEO_ID_RE
            .captures(reference)
            .and_then(|cap| cap.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or_else(|| TranscriptError::InvalidVideoReference(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}", Self::WATCH_BASE_URL, self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{}/{}/0.jpg", Self::THUMBNAIL_BASE_URL, self.0)
    }
}

impl FromStr for VideoId {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoId::parse(s)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub language_code: String,
    pub is_generated: bool,
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Entry texts joined with single spaces; timing is dropped.
    pub fn text(&self) -> String {
        self.entries.iter().map(|e| e.text.as_str()).join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.text.trim().is_empty())
    }
}
