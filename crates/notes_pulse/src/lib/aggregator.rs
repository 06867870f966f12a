use itertools::Itertools;
use crate::{
    chunker,
    planner::{self, BatchPlan, Plan},
    render::format_batch_block,
    validator, Error, MetadataRecorder, RunMetadata, Stage, StructuredSummary, Summarizer,
    SummarizerClient, SummarizerConfig,
};

const SUMMARY_PROMPT: &str = include_str!("./llm/prompts/summary.txt");
const CONSOLIDATION_PROMPT: &str = include_str!("./llm/prompts/consolidate.txt");

/// Chunks joined into one batch request are separated by a blank line
const BATCH_SEPARATOR: &str = "\n\n";

/// Final summary of one run together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub summary: StructuredSummary,
    pub metadata: RunMetadata,
}

/// Summarizes arbitrarily long text without exceeding the configured call budget.
///
/// Short input is summarized with a single call. Longer input is chunked,
/// grouped into at most `call_budget - 1` batches, each batch is summarized in
/// order, and the batch summaries are consolidated with one final call. The
/// first failing call or malformed response aborts the run and discards any
/// batch summaries gathered so far.
#[derive(Debug, Clone)]
pub struct HierarchicalSummarizer<S> {
    client: SummarizerClient<S>,
    config: SummarizerConfig,
}

impl<S: Summarizer> HierarchicalSummarizer<S> {
    pub fn new(client: SummarizerClient<S>, config: SummarizerConfig) -> Self {
        Self { client, config }
    }

    #[tracing::instrument(skip_all, fields(input_chars = text.chars().count(), call_budget = self.config.call_budget))]
    pub async fn summarize(&self, text: &str) -> Result<SummaryReport, Error> {
        if text.trim().is_empty() {
            return Err(Error::Input("Transcript is empty".into()));
        }

        let input_chars = text.chars().count();
        let recorder = MetadataRecorder::start(input_chars, self.config.call_budget);

        let chunks = chunker::chunk(text, self.config.max_chunk_size);
        tracing::info!(chunks = chunks.len(), "Transcript chunked");

        let plan = planner::plan(chunks.len(), self.config.call_budget).map_err(|e| {
            tracing::error!(error = %e, "Call budget cannot cover transcript");
            Error::QuotaInfeasible {
                input_chars,
                required_calls: e.required_calls,
                call_budget: e.call_budget,
            }
        })?;

        let summary = match plan {
            Plan::Direct => self.summarize_direct(text).await?,
            Plan::Batched(batch_plan) => self.summarize_batched(&chunks, batch_plan).await?,
        };

        let metadata = recorder.finish(chunks.len(), plan.batch_count(), plan.estimated_calls());
        tracing::info!(
            api_calls_used = metadata.api_calls_used,
            elapsed_secs = metadata.elapsed_seconds(),
            "Summary complete"
        );

        Ok(SummaryReport { summary, metadata })
    }

    async fn summarize_direct(&self, text: &str) -> Result<StructuredSummary, Error> {
        tracing::info!(api_call = 1, "Summarizing transcript in a single call");
        self.complete_validated(Stage::Direct, SUMMARY_PROMPT, text).await
    }

    async fn summarize_batched(
        &self,
        chunks: &[String],
        plan: BatchPlan,
    ) -> Result<StructuredSummary, Error> {
        tracing::info!(
            batches = plan.batch_count,
            chunks_per_batch = plan.chunks_per_batch,
            estimated_calls = plan.estimated_calls,
            "Batch plan ready"
        );

        let mut batch_summaries = Vec::with_capacity(plan.batch_count);
        for (i, batch) in plan.batches(chunks).enumerate() {
            let stage = Stage::Batch {
                index: i + 1,
                total: plan.batch_count,
            };
            tracing::info!(
                "Summarizing batch {}/{} - API call {}/{}",
                i + 1,
                plan.batch_count,
                i + 1,
                plan.estimated_calls
            );

            let content = batch.join(BATCH_SEPARATOR);
            let summary = self
                .complete_validated(stage, SUMMARY_PROMPT, &content)
                .await?;
            batch_summaries.push(summary);
        }

        tracing::info!(
            "Consolidating {} batch summaries - API call {}/{}",
            batch_summaries.len(),
            plan.estimated_calls,
            plan.estimated_calls
        );
        let combined = batch_summaries.iter().map(format_batch_block).join(BATCH_SEPARATOR);

        self.complete_validated(Stage::Consolidation, CONSOLIDATION_PROMPT, &combined)
            .await
    }

    /// One completion request followed by schema validation of its output.
    async fn complete_validated(
        &self,
        stage: Stage,
        instructions: &str,
        content: &str,
    ) -> Result<StructuredSummary, Error> {
        let raw = self
            .client
            .complete(instructions, content)
            .await
            .map_err(|e| Error::from_client(stage, e))?;

        validator::validate(&raw)
            .inspect_err(|e| tracing::error!(error = %e, %stage, "Model returned a malformed summary"))
            .map_err(|source| Error::MalformedResponse { stage, source })
    }
}
