#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Invalid YouTube URL format: '{0}'. Use: https://www.youtube.com/watch?v=VIDEO_ID")]
    InvalidVideoReference(String),

    #[error(
        "No English transcript available for video {video_id}. \
         The video either has no captions or only has transcripts in other languages."
    )]
    NoTranscript { video_id: String },

    #[error("Video {video_id} not found: {reason}")]
    VideoNotFound { video_id: String, reason: String },

    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse YouTube response: {0}")]
    ParseError(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
