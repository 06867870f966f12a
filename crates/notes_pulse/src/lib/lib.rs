mod aggregator;
pub mod chunker;
mod config;
mod error;
mod llm;
mod metadata;
pub mod planner;
mod processor;
pub mod render;
pub mod tracing;
pub mod types;
pub mod validator;

pub use aggregator::{HierarchicalSummarizer, SummaryReport};
pub use config::SummarizerConfig;
pub use error::{Error, FailureKind, Stage};
pub use llm::openai;
pub use llm::{
    client::{ClientError, SummarizerClient},
    retry::{Backoff, RetryPolicy},
    summarizer::{CompletionError, Summarizer},
};
pub use metadata::{MetadataRecorder, RunMetadata};
pub use planner::{plan, BatchPlan, Infeasible, Plan};
pub use processor::{builder::VideoNotesProcessorBuilder, RunOutcome, VideoNotes, VideoNotesProcessor};
pub use types::StructuredSummary;
pub use validator::{validate, ValidationError};
