use std::collections::VecDeque;

use helios_core::models::WeightChange;

/// Bounded, oldest-first log of one detector's weight changes.
#[derive(Debug, Clone)]
pub struct TrustHistory {
    changes: VecDeque<WeightChange>,
    limit: usize,
    total: u64,
}

impl TrustHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            changes: VecDeque::with_capacity(limit.min(64)),
            limit,
            total: 0,
        }
    }

    pub fn record(&mut self, change: WeightChange) {
        self.total += 1;
        if self.limit == 0 {
            return;
        }
        if self.changes.len() == self.limit {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// Every update ever recorded, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn latest(&self) -> Option<&WeightChange> {
        self.changes.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightChange> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
