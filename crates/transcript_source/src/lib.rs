//! # Transcript Source
//!
//! This crate provides the transcript-retrieval side of the notes pipeline:
//! parsing a YouTube video reference, and fetching the caption track of that
//! video as an ordered list of timed entries.
//!
//! The [`TranscriptSource`] trait is the abstraction the summarizer depends on;
//! [`YouTubeTranscriptSource`] is the production implementation that reads the
//! caption tracks advertised on the video's watch page.

mod domain;
mod error;
mod source;

pub use domain::{Transcript, TranscriptEntry, VideoId};
pub use error::TranscriptError;
pub use source::youtube::{CaptionTrack, YouTubeTranscriptSource};
pub use source::{LanguagePreference, TranscriptSource};
