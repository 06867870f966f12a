use std::fmt;

use transcript_source::TranscriptError;

use crate::{render::format_thousands, ClientError, ValidationError};

/// Where in a run a model response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Direct,
    Batch { index: usize, total: usize },
    Consolidation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Direct => f.write_str("summary"),
            Stage::Batch { index, total } => write!(f, "batch {index}/{total} summary"),
            Stage::Consolidation => f.write_str("final summary"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Input(String),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(
        "Quota Alert: This transcript ({} chars) would require {required_calls} API calls, \
         but limit is {call_budget}. Transcript too long for the configured call budget.",
        thousands(.input_chars)
    )]
    QuotaInfeasible {
        input_chars: usize,
        required_calls: usize,
        call_budget: usize,
    },

    #[error("Quota exceeded after {attempts} attempts while generating the {stage}: {message}")]
    QuotaExceeded {
        stage: Stage,
        attempts: u32,
        message: String,
    },

    #[error("Failed to parse {stage}: {source}")]
    MalformedResponse {
        stage: Stage,
        source: ValidationError,
    },

    #[error("API error while generating the {stage}: {message}")]
    Upstream { stage: Stage, message: String },
}

/// Coarse failure cause shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    TranscriptUnavailable,
    VideoNotFound,
    QuotaExceeded,
    MalformedResponse,
    ApiError,
}

impl Error {
    pub(crate) fn from_client(stage: Stage, err: ClientError) -> Self {
        match err {
            ClientError::QuotaExceeded { attempts, message } => Error::QuotaExceeded {
                stage,
                attempts,
                message,
            },
            ClientError::Upstream(message) => Error::Upstream { stage, message },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Input(_) => FailureKind::InvalidInput,
            Error::Transcript(TranscriptError::InvalidVideoReference(_)) => FailureKind::InvalidInput,
            Error::Transcript(TranscriptError::NoTranscript { .. }) => {
                FailureKind::TranscriptUnavailable
            }
            Error::Transcript(TranscriptError::VideoNotFound { .. }) => FailureKind::VideoNotFound,
            Error::Transcript(e) if mentions_not_found(&e.to_string()) => FailureKind::VideoNotFound,
            Error::Transcript(_) => FailureKind::ApiError,
            Error::QuotaInfeasible { .. } | Error::QuotaExceeded { .. } => FailureKind::QuotaExceeded,
            Error::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Error::Upstream { .. } => FailureKind::ApiError,
        }
    }

    /// Single user-facing message for the failure.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::InvalidInput => format!("Invalid input: {self}"),
            FailureKind::TranscriptUnavailable => format!("Transcript unavailable: {self}"),
            FailureKind::VideoNotFound => "Video not found. Please check the YouTube URL.".into(),
            FailureKind::QuotaExceeded => match self {
                Error::QuotaExceeded { .. } => format!(
                    "{self}\n\nFree tier limit reached. Please:\n\
                     1. Wait a minute and try again\n\
                     2. Upgrade to a paid plan for higher limits\n\
                     3. Use a different API key"
                ),
                _ => self.to_string(),
            },
            FailureKind::MalformedResponse => self.to_string(),
            FailureKind::ApiError => match self {
                Error::Transcript(e) => format!("Error extracting transcript: {e}"),
                _ => format!("Error: {self}"),
            },
        }
    }
}

fn thousands(n: &usize) -> String {
    format_thousands(*n)
}

fn mentions_not_found(message: &str) -> bool {
    message.contains("404") || message.to_lowercase().contains("not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_infeasible_message_states_numbers() {
        let err = Error::QuotaInfeasible {
            input_chars: 1_250_000,
            required_calls: 9,
            call_budget: 8,
        };

        assert_eq!(err.kind(), FailureKind::QuotaExceeded);
        let message = err.user_message();
        assert!(message.contains("1,250,000 chars"));
        assert!(message.contains("require 9 API calls"));
        assert!(message.contains("limit is 8"));
    }

    #[test]
    fn test_transcript_errors_are_categorized() {
        let unavailable = Error::from(TranscriptError::NoTranscript {
            video_id: "abc".into(),
        });
        assert_eq!(unavailable.kind(), FailureKind::TranscriptUnavailable);
        assert!(unavailable.user_message().starts_with("Transcript unavailable: "));

        let invalid = Error::from(TranscriptError::InvalidVideoReference("nope".into()));
        assert_eq!(invalid.kind(), FailureKind::InvalidInput);

        let missing = Error::from(TranscriptError::VideoNotFound {
            video_id: "abc".into(),
            reason: "Video unavailable".into(),
        });
        assert_eq!(
            missing.user_message(),
            "Video not found. Please check the YouTube URL."
        );
    }

    #[test]
    fn test_transcript_not_found_is_recategorized() {
        let err = Error::from(TranscriptError::ParseError("upstream said: Not Found"));
        assert_eq!(err.kind(), FailureKind::VideoNotFound);

        let err = Error::from(TranscriptError::ParseError("unexpected layout"));
        assert_eq!(err.kind(), FailureKind::ApiError);
        assert!(err.user_message().starts_with("Error extracting transcript: "));
    }

    #[test]
    fn test_llm_errors_are_api_errors() {
        let err = Error::Upstream {
            stage: Stage::Direct,
            message: "API error: 404 - model not found".into(),
        };
        assert_eq!(err.kind(), FailureKind::ApiError);
        assert!(err.user_message().contains("404 - model not found"));
    }

    #[test]
    fn test_malformed_response_names_stage() {
        let err = Error::MalformedResponse {
            stage: Stage::Batch { index: 2, total: 5 },
            source: ValidationError::KeyPointsNotStrings,
        };
        assert_eq!(
            err.user_message(),
            "Failed to parse batch 2/5 summary: 'key_points' must be a list of strings"
        );
    }

    #[test]
    fn test_client_errors_keep_stage() {
        let err = Error::from_client(
            Stage::Consolidation,
            ClientError::QuotaExceeded {
                attempts: 3,
                message: "429".into(),
            },
        );
        assert!(matches!(
            err,
            Error::QuotaExceeded {
                stage: Stage::Consolidation,
                attempts: 3,
                ..
            }
        ));
        assert!(err.user_message().contains("Wait a minute"));
    }
}
