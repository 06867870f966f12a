use transcript_source::TranscriptSource;

use crate::{
    HierarchicalSummarizer, RetryPolicy, Summarizer, SummarizerClient, SummarizerConfig,
    VideoNotesProcessor,
};

pub struct VideoNotesProcessorBuilder<T = (), S = ()> {
    transcript_source: T,
    summarizer: S,
    config: SummarizerConfig,
    retry_policy: RetryPolicy,
}

impl VideoNotesProcessorBuilder {
    pub fn new() -> Self {
        Self {
            transcript_source: (),
            summarizer: (),
            config: SummarizerConfig::default(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl Default for VideoNotesProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> VideoNotesProcessorBuilder<T, S> {
    pub fn transcript_source<T2: TranscriptSource + Send + Sync>(
        self,
        transcript_source: T2,
    ) -> VideoNotesProcessorBuilder<T2, S> {
        VideoNotesProcessorBuilder {
            transcript_source,
            summarizer: self.summarizer,
            config: self.config,
            retry_policy: self.retry_policy,
        }
    }

    pub fn summarizer<S2: Summarizer>(self, summarizer: S2) -> VideoNotesProcessorBuilder<T, S2> {
        VideoNotesProcessorBuilder {
            transcript_source: self.transcript_source,
            summarizer,
            config: self.config,
            retry_policy: self.retry_policy,
        }
    }

    pub fn max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.config.max_chunk_size = max_chunk_size;
        self
    }

    pub fn call_budget(mut self, call_budget: usize) -> Self {
        self.config.call_budget = call_budget;
        self
    }

    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }
}

impl<T, S> VideoNotesProcessorBuilder<T, S>
where
    T: TranscriptSource + Send + Sync,
    S: Summarizer,
{
    pub fn build(self) -> VideoNotesProcessor<T, S> {
        let client = SummarizerClient::new(self.summarizer, self.retry_policy);
        VideoNotesProcessor::new(
            self.transcript_source,
            HierarchicalSummarizer::new(client, self.config),
        )
    }
}
