use serde::{Deserialize, Serialize};

/// Scheduling-wide time configuration, loaded from the `[schedule]` table
/// of the run's TOML config file — mirrors the period/lunch layout the
/// parent repo's `ScheduleConfig` describes, generalized to the slot
/// catalog this crate builds the GA's `SchedulingInput` from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub periods_per_day: u32,
    pub day_count: u32,
    /// 0-indexed period positions within a day that fall in the lunch
    /// window (soft: at least one should stay free per section).
    pub lunch_periods: Vec<u32>,
    /// 0-indexed day positions with no usable slots at all (holidays).
    pub holiday_days: Vec<u32>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            periods_per_day: 8,
            day_count: 5,
            lunch_periods: vec![3, 4],
            holiday_days: Vec::new(),
        }
    }
}
