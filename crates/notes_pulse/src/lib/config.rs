/// Tunables of the hierarchical summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Upper bound, in characters, of one transcript chunk
    pub max_chunk_size: usize,
    /// Maximum number of completion requests one run may issue
    pub call_budget: usize,
}

impl SummarizerConfig {
    pub const DEFAULT_MAX_CHUNK_SIZE: usize = 30_000;
    pub const DEFAULT_CALL_BUDGET: usize = 8;
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: Self::DEFAULT_MAX_CHUNK_SIZE,
            call_budget: Self::DEFAULT_CALL_BUDGET,
        }
    }
}
