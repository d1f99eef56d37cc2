use super::SlotId;
use std::collections::HashMap;

/// Precomputed lookup from a slot id to its position in the catalog's
/// `slot_order`, so day computation is O(1) rather than a linear scan
/// repeated for every gene on every generation.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    position: HashMap<SlotId, usize>,
    periods_per_day: u32,
}

impl SlotIndex {
    pub fn build(slot_order: &[SlotId], periods_per_day: u32) -> Self {
        let position = slot_order
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, i))
            .collect();
        Self {
            position,
            periods_per_day,
        }
    }

    /// 0-based day index of `slot`: `indexOf(s, slot_order) / periods_per_day`.
    /// `None` if `slot` does not appear in the catalog at all.
    pub fn day_of(&self, slot: SlotId) -> Option<usize> {
        self.position
            .get(&slot)
            .map(|&idx| idx / self.periods_per_day as usize)
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.position.contains_key(&slot)
    }

    /// 0-based period-of-day index of `slot`: `indexOf(s, slot_order) % periods_per_day`.
    pub fn period_of(&self, slot: SlotId) -> Option<usize> {
        self.position
            .get(&slot)
            .map(|&idx| idx % self.periods_per_day as usize)
    }
}
