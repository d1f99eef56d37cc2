use crate::types::{Gene, SchedulingInput};
use crate::validator::{evaluate, EvaluationReport};
use std::collections::HashMap;

/// §4.6: hard violations dominate everything. A single hard violation
/// outweighs any soft profile, so the GA always climbs toward feasibility
/// first and only optimizes soft penalties once feasible.
pub const HARD_VIOLATION_PENALTY: i64 = 1_000_000;

/// Score one chromosome's flattened genes. Higher is better.
pub fn fitness_of(genes: &[Gene], input: &SchedulingInput, soft_weights: &HashMap<String, i64>) -> i64 {
    score(&evaluate(genes, input, soft_weights))
}

pub fn score(report: &EvaluationReport) -> i64 {
    if report.hard_total > 0 {
        -HARD_VIOLATION_PENALTY * report.hard_total as i64
    } else {
        1000 - report.soft_weighted_total
    }
}
