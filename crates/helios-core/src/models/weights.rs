use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DetectorId;

/// Point-in-time copy of every trust weight.
///
/// Taken once per run and never updated, so one run can never mix pre- and
/// post-recalibration weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    weights: BTreeMap<DetectorId, f64>,
    taken_at: DateTime<Utc>,
}

impl WeightSnapshot {
    pub fn new(weights: BTreeMap<DetectorId, f64>) -> Self {
        Self {
            weights,
            taken_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &DetectorId) -> Option<f64> {
        self.weights.get(id).copied()
    }

    pub fn contains(&self, id: &DetectorId) -> bool {
        self.weights.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DetectorId, f64)> {
        self.weights.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn as_map(&self) -> &BTreeMap<DetectorId, f64> {
        &self.weights
    }

    pub fn into_map(self) -> BTreeMap<DetectorId, f64> {
        self.weights
    }
}

impl FromIterator<(DetectorId, f64)> for WeightSnapshot {
    fn from_iter<I: IntoIterator<Item = (DetectorId, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One recorded change to a detector's weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightChange {
    pub detector_id: DetectorId,
    pub previous: f64,
    /// Value asked for before clamping.
    pub requested: f64,
    /// Value stored after clamping.
    pub applied: f64,
    pub at: DateTime<Utc>,
}

impl WeightChange {
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }

    pub fn delta(&self) -> f64 {
        self.applied - self.previous
    }
}
