//! Call-budget aware batching.
//!
//! One call is always reserved for the final consolidation pass, so at most
//! `call_budget - 1` batches can be summarized. The planner grows the batch
//! size rather than the batch count, which keeps any chunk count within budget
//! as long as the budget allows at least one batch plus the final pass.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// At most one chunk: summarize the whole input in a single call
    Direct,
    Batched(BatchPlan),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub chunks_per_batch: usize,
    pub batch_count: usize,
    /// Batch calls plus the final consolidation call
    pub estimated_calls: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("plan requires {required_calls} API calls but the budget is {call_budget}")]
pub struct Infeasible {
    pub required_calls: usize,
    pub call_budget: usize,
}

impl Plan {
    pub fn estimated_calls(&self) -> usize {
        match self {
            Plan::Direct => 1,
            Plan::Batched(plan) => plan.estimated_calls,
        }
    }

    pub fn batch_count(&self) -> usize {
        match self {
            Plan::Direct => 1,
            Plan::Batched(plan) => plan.batch_count,
        }
    }
}

impl BatchPlan {
    /// Consecutive, non-overlapping groups of `chunks_per_batch` items.
    pub fn batches<'a, T>(&self, chunks: &'a [T]) -> std::slice::Chunks<'a, T> {
        chunks.chunks(self.chunks_per_batch)
    }
}

pub fn plan(chunk_count: usize, call_budget: usize) -> Result<Plan, Infeasible> {
    if chunk_count <= 1 {
        return match call_budget {
            0 => Err(Infeasible {
                required_calls: 1,
                call_budget,
            }),
            _ => Ok(Plan::Direct),
        };
    }

    // at least one batch plus the final pass
    let Some(max_batches) = call_budget.checked_sub(1).filter(|&b| b > 0) else {
        return Err(Infeasible {
            required_calls: 2,
            call_budget,
        });
    };

    let chunks_per_batch = chunk_count.div_ceil(max_batches).max(1);
    let batch_count = chunk_count.div_ceil(chunks_per_batch);
    let estimated_calls = batch_count + 1;

    if estimated_calls > call_budget {
        return Err(Infeasible {
            required_calls: estimated_calls,
            call_budget,
        });
    }

    Ok(Plan::Batched(BatchPlan {
        chunks_per_batch,
        batch_count,
        estimated_calls,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batched(chunk_count: usize, call_budget: usize) -> BatchPlan {
        match plan(chunk_count, call_budget) {
            Ok(Plan::Batched(p)) => p,
            other => panic!("expected a batched plan, got {other:?}"),
        }
    }

    #[test]
    fn test_ten_chunks_budget_eight() {
        let p = batched(10, 8);
        assert_eq!(p.chunks_per_batch, 2);
        assert_eq!(p.batch_count, 5);
        assert_eq!(p.estimated_calls, 6);
    }

    #[test]
    fn test_hundred_chunks_lands_exactly_on_budget() {
        let p = batched(100, 8);
        assert_eq!(p.chunks_per_batch, 15);
        assert_eq!(p.batch_count, 7);
        assert_eq!(p.estimated_calls, 8);
    }

    #[test]
    fn test_two_hundred_chunks_scales_batch_size() {
        let p = batched(200, 8);
        assert_eq!(p.chunks_per_batch, 29);
        assert_eq!(p.batch_count, 7);
        assert_eq!(p.estimated_calls, 8);
    }

    #[test]
    fn test_feasible_plans_never_exceed_budget() {
        for call_budget in 2..=20 {
            for chunk_count in 2..=500 {
                let p = batched(chunk_count, call_budget);
                assert!(
                    p.estimated_calls <= call_budget,
                    "chunks={chunk_count} budget={call_budget} -> {p:?}"
                );
                assert!(p.batch_count < call_budget);
                assert!(p.batch_count * p.chunks_per_batch >= chunk_count);
                assert!((p.batch_count - 1) * p.chunks_per_batch < chunk_count);
            }
        }
    }

    #[test]
    fn test_single_chunk_goes_direct() {
        assert_eq!(plan(0, 8), Ok(Plan::Direct));
        assert_eq!(plan(1, 8), Ok(Plan::Direct));
        assert_eq!(plan(1, 1), Ok(Plan::Direct));
        assert_eq!(Plan::Direct.estimated_calls(), 1);
    }

    #[test]
    fn test_budget_too_small_is_infeasible() {
        assert_eq!(
            plan(5, 1),
            Err(Infeasible {
                required_calls: 2,
                call_budget: 1
            })
        );
        assert_eq!(
            plan(5, 0),
            Err(Infeasible {
                required_calls: 2,
                call_budget: 0
            })
        );
        assert_eq!(
            plan(1, 0),
            Err(Infeasible {
                required_calls: 1,
                call_budget: 0
            })
        );
    }

    #[test]
    fn test_batches_partition_chunks() {
        let chunks = (0..10).collect::<Vec<_>>();
        let p = batched(chunks.len(), 8);
        let batches = p.batches(&chunks).collect::<Vec<_>>();

        assert_eq!(batches.len(), p.batch_count);
        assert_eq!(batches.concat(), chunks);
        assert!(batches.iter().all(|b| !b.is_empty()));
    }
}
