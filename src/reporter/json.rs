use crate::error::Result;
use crate::scheduler::{encode, RunResult};

/// Full result (rows + fitness + breakdowns) as pretty JSON.
pub fn generate_json_report(result: &RunResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Summary statistics as JSON, without the full row list.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub row_count: usize,
    pub fitness: i64,
    pub generations_executed: usize,
    pub cancelled: bool,
    pub hard_total: u32,
}

pub fn generate_json_summary(result: &RunResult) -> Result<String> {
    let summary = JsonSummary {
        row_count: encode(&result.genes).len(),
        fitness: result.fitness,
        generations_executed: result.generations_executed,
        cancelled: result.cancelled,
        hard_total: result.hard_breakdown.values().sum(),
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
