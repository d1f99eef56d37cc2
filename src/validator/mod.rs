mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::types::{Gene, SchedulingInput};
use std::collections::HashMap;

/// Violation-kind -> count. Every kind named in §4.4 is always present with
/// its (possibly zero) count — the evaluator counts everything before the
/// engine decides whether the total disqualifies the chromosome.
pub type HardBreakdown = HashMap<String, u32>;

/// Soft-penalty-kind -> count, see §4.5.
pub type SoftBreakdown = HashMap<String, u32>;

/// Result of evaluating one chromosome (flattened to its genes).
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub hard: HardBreakdown,
    pub hard_total: u32,
    pub soft: SoftBreakdown,
    pub soft_weighted_total: i64,
}

/// Evaluate a flattened gene list against the input. Soft penalties are
/// only computed when there are no hard violations (§4.5: "Executed only
/// when hard count is zero"); the hard breakdown itself always counts
/// every violation kind instead of short-circuiting on the first one, so
/// diagnostics stay complete.
pub fn evaluate(
    genes: &[Gene],
    input: &SchedulingInput,
    soft_weights: &HashMap<String, i64>,
) -> EvaluationReport {
    let hard = check_hard_constraints(genes, input);
    let hard_total: u32 = hard.values().sum();

    if hard_total > 0 {
        return EvaluationReport {
            hard,
            hard_total,
            soft: SoftBreakdown::new(),
            soft_weighted_total: 0,
        };
    }

    let (soft_weighted_total, soft) = score_soft_constraints(genes, input, soft_weights);
    EvaluationReport {
        hard,
        hard_total,
        soft,
        soft_weighted_total,
    }
}
