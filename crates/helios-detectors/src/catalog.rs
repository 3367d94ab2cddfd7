//! Detector lookup table keyed by stable id.

use std::collections::BTreeMap;
use std::sync::Arc;

use helios_core::config::DetectorConfig;
use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::DetectorId;
use helios_core::traits::Detector;
use tracing::debug;

use crate::adapter::DetectorAdapter;
use crate::adapters::{
    HabitabilityDetector, OrbitalDynamicsDetector, RadialVelocityDetector, TransitDetector,
};

/// Detectors registered at process start.
///
/// Iteration order is by id, so fan-out and logs are deterministic.
#[derive(Debug, Clone, Default)]
pub struct DetectorCatalog {
    detectors: BTreeMap<DetectorId, DetectorAdapter>,
}

impl DetectorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in detectors.
    pub fn standard(config: &DetectorConfig) -> Self {
        let builtins: [Arc<dyn Detector>; 4] = [
            Arc::new(TransitDetector::new(config)),
            Arc::new(RadialVelocityDetector::new(config)),
            Arc::new(OrbitalDynamicsDetector::new(config)),
            Arc::new(HabitabilityDetector::new(config)),
        ];
        let detectors = builtins
            .into_iter()
            .map(|d| (d.id().clone(), DetectorAdapter::new(d)))
            .collect();
        Self { detectors }
    }

    /// Register a detector. Ids must be unique.
    pub fn register(&mut self, detector: Arc<dyn Detector>) -> HeliosResult<()> {
        let id = detector.id().clone();
        if self.detectors.contains_key(&id) {
            return Err(HeliosError::DuplicateDetector { id: id.to_string() });
        }
        debug!(detector = %id, "registered detector");
        self.detectors.insert(id, DetectorAdapter::new(detector));
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, detector: impl Detector + 'static) -> HeliosResult<Self> {
        self.register(Arc::new(detector))?;
        Ok(self)
    }

    pub fn get(&self, id: &DetectorId) -> Option<&DetectorAdapter> {
        self.detectors.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &DetectorId> {
        self.detectors.keys()
    }

    pub fn adapters(&self) -> impl Iterator<Item = &DetectorAdapter> {
        self.detectors.values()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
