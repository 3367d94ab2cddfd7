//! TrustRegistry: the single owner of per-detector trust weights.
//!
//! Invariant: every stored weight lies in `[min_weight, max_weight]`. New
//! detectors start at `default_weight`. There is no removal: a detector that
//! stops being queried keeps its weight for later reuse.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, instrument};

use helios_core::config::TrustConfig;
use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::{DetectorId, WeightChange, WeightSnapshot};

use crate::history::TrustHistory;

#[derive(Debug, Default)]
struct RegistryState {
    weights: BTreeMap<DetectorId, f64>,
    history: HashMap<DetectorId, TrustHistory>,
}

/// Read view of the current weights handed to batch updates.
///
/// Unregistered ids read as the default weight.
pub struct CurrentWeights<'a> {
    weights: &'a BTreeMap<DetectorId, f64>,
    default_weight: f64,
}

impl CurrentWeights<'_> {
    pub fn get(&self, id: &DetectorId) -> f64 {
        self.weights.get(id).copied().unwrap_or(self.default_weight)
    }
}

/// Many concurrent readers, one writer at a time.
#[derive(Debug)]
pub struct TrustRegistry {
    config: TrustConfig,
    state: RwLock<RegistryState>,
}

impl TrustRegistry {
    pub fn new(config: &TrustConfig) -> Self {
        Self {
            config: config.clone(),
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Current weight of `id`, registering it at the default if unseen.
    pub fn get_weight(&self, id: &DetectorId) -> HeliosResult<f64> {
        if let Some(w) = self.read()?.weights.get(id) {
            return Ok(*w);
        }
        let mut state = self.write()?;
        let default = self.config.default_weight;
        let w = *state.weights.entry(id.clone()).or_insert_with(|| {
            debug!(detector = %id, weight = default, "registered detector");
            default
        });
        Ok(w)
    }

    /// Register every id in `ids` that is not yet known.
    pub fn register_all<'a>(&self, ids: impl IntoIterator<Item = &'a DetectorId>) -> HeliosResult<()> {
        let mut state = self.write()?;
        for id in ids {
            if !state.weights.contains_key(id) {
                debug!(detector = %id, weight = self.config.default_weight, "registered detector");
                state.weights.insert(id.clone(), self.config.default_weight);
            }
        }
        Ok(())
    }

    /// Current weight without registering.
    pub fn peek(&self, id: &DetectorId) -> HeliosResult<Option<f64>> {
        Ok(self.read()?.weights.get(id).copied())
    }

    /// Atomic copy of every weight. Taken once per run.
    pub fn snapshot(&self) -> HeliosResult<WeightSnapshot> {
        Ok(WeightSnapshot::new(self.read()?.weights.clone()))
    }

    /// Replace one detector's weight with `new_weight` clamped into bounds.
    #[instrument(skip(self), fields(detector = %id))]
    pub fn apply_update(&self, id: &DetectorId, new_weight: f64) -> HeliosResult<WeightChange> {
        reject_non_finite(id, new_weight)?;
        let mut state = self.write()?;
        Ok(self.apply_locked(&mut state, id, new_weight))
    }

    /// Apply a batch of updates under a single write lock.
    ///
    /// `compute` sees the weights as they are at the moment the lock is taken
    /// and returns the new (unclamped) weight per detector. If it fails, or
    /// any returned weight is NaN or infinite, nothing is applied.
    pub fn apply_batch<F>(&self, compute: F) -> HeliosResult<Vec<WeightChange>>
    where
        F: FnOnce(&CurrentWeights<'_>) -> HeliosResult<Vec<(DetectorId, f64)>>,
    {
        let mut state = self.write()?;
        let updates = compute(&CurrentWeights {
            weights: &state.weights,
            default_weight: self.config.default_weight,
        })?;
        for (id, w) in &updates {
            reject_non_finite(id, *w)?;
        }
        let changes = updates
            .into_iter()
            .map(|(id, w)| self.apply_locked(&mut state, &id, w))
            .collect();
        Ok(changes)
    }

    /// Retained weight changes for `id`, oldest first.
    pub fn history(&self, id: &DetectorId) -> HeliosResult<Vec<WeightChange>> {
        Ok(self
            .read()?
            .history
            .get(id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Number of updates ever applied to `id`.
    pub fn update_count(&self, id: &DetectorId) -> HeliosResult<u64> {
        Ok(self.read()?.history.get(id).map_or(0, TrustHistory::total))
    }

    pub fn total_updates(&self) -> HeliosResult<u64> {
        Ok(self.read()?.history.values().map(TrustHistory::total).sum())
    }

    pub fn len(&self) -> HeliosResult<usize> {
        Ok(self.read()?.weights.len())
    }

    pub fn is_empty(&self) -> HeliosResult<bool> {
        Ok(self.read()?.weights.is_empty())
    }

    fn apply_locked(&self, state: &mut RegistryState, id: &DetectorId, requested: f64) -> WeightChange {
        let applied = self.config.clamp(requested);
        let previous = state
            .weights
            .insert(id.clone(), applied)
            .unwrap_or(self.config.default_weight);
        let change = WeightChange {
            detector_id: id.clone(),
            previous,
            requested,
            applied,
            at: Utc::now(),
        };
        debug!(
            detector = %id,
            previous,
            requested,
            applied,
            clamped = change.was_clamped(),
            "trust weight updated"
        );
        let limit = self.config.history_limit;
        state
            .history
            .entry(id.clone())
            .or_insert_with(|| TrustHistory::new(limit))
            .record(change.clone());
        change
    }

    fn read(&self) -> HeliosResult<RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|_| HeliosError::ConcurrencyError("trust registry lock poisoned".into()))
    }

    fn write(&self) -> HeliosResult<RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|_| HeliosError::ConcurrencyError("trust registry lock poisoned".into()))
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self::new(&TrustConfig::default())
    }
}

fn reject_non_finite(id: &DetectorId, weight: f64) -> HeliosResult<()> {
    if !weight.is_finite() {
        return Err(HeliosError::InvalidWeights {
            reason: format!("non-finite weight {weight} requested for detector {id}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DetectorId {
        DetectorId::from(s)
    }

    #[test]
    fn unseen_detector_starts_at_default_and_is_registered() {
        let registry = TrustRegistry::default();
        assert_eq!(registry.peek(&id("transit")).unwrap(), None);
        assert_eq!(registry.get_weight(&id("transit")).unwrap(), 1.0);
        assert_eq!(registry.peek(&id("transit")).unwrap(), Some(1.0));
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn updates_are_clamped_into_bounds() {
        let registry = TrustRegistry::default();
        let up = registry.apply_update(&id("a"), 7.5).unwrap();
        assert_eq!(up.applied, 2.0);
        assert!(up.was_clamped());
        let down = registry.apply_update(&id("a"), -3.0).unwrap();
        assert_eq!(down.previous, 2.0);
        assert_eq!(down.applied, 0.1);
        assert_eq!(registry.get_weight(&id("a")).unwrap(), 0.1);
    }

    #[test]
    fn non_finite_update_is_rejected_without_mutation() {
        let registry = TrustRegistry::default();
        registry.apply_update(&id("a"), 1.4).unwrap();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                registry.apply_update(&id("a"), bad),
                Err(HeliosError::InvalidWeights { .. })
            ));
        }
        assert_eq!(registry.peek(&id("a")).unwrap(), Some(1.4));
        assert_eq!(registry.update_count(&id("a")).unwrap(), 1);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let registry = TrustRegistry::default();
        registry.get_weight(&id("a")).unwrap();
        let snap = registry.snapshot().unwrap();
        registry.apply_update(&id("a"), 1.9).unwrap();
        assert_eq!(snap.get(&id("a")), Some(1.0));
        assert_eq!(registry.snapshot().unwrap().get(&id("a")), Some(1.9));
    }

    #[test]
    fn failed_batch_applies_nothing() {
        let registry = TrustRegistry::default();
        registry.register_all([&id("a"), &id("b")]).unwrap();
        let result = registry.apply_batch(|_| {
            Err(HeliosError::InvalidWeights {
                reason: "test".into(),
            })
        });
        assert!(result.is_err());
        assert_eq!(registry.total_updates().unwrap(), 0);

        let result = registry.apply_batch(|_| Ok(vec![(id("a"), 1.5), (id("b"), f64::NAN)]));
        assert!(result.is_err());
        assert_eq!(registry.peek(&id("a")).unwrap(), Some(1.0));
    }

    #[test]
    fn batch_reads_current_weights() {
        let registry = TrustRegistry::default();
        registry.apply_update(&id("a"), 1.5).unwrap();
        let changes = registry
            .apply_batch(|current| {
                let w = current.get(&id("a"));
                Ok(vec![(id("a"), w + 0.25), (id("new"), current.get(&id("new")) - 0.5)])
            })
            .unwrap();
        assert_eq!(changes[0].previous, 1.5);
        assert_eq!(changes[0].applied, 1.75);
        assert_eq!(changes[1].previous, 1.0);
        assert_eq!(changes[1].applied, 0.5);
    }

    #[test]
    fn history_is_bounded_by_config() {
        let registry = TrustRegistry::new(&TrustConfig {
            history_limit: 3,
            ..Default::default()
        });
        for i in 0..5 {
            registry.apply_update(&id("a"), 1.0 + i as f64 * 0.1).unwrap();
        }
        assert_eq!(registry.history(&id("a")).unwrap().len(), 3);
        assert_eq!(registry.update_count(&id("a")).unwrap(), 5);
        assert!(registry.history(&id("never")).unwrap().is_empty());
    }
}
