//! Coordinator: the entry point for observations and feedback.
//!
//! One call to [`Coordinator::submit_observation`] drives one run through
//! `Collecting → Aggregating → Sealed`:
//!
//! 1. the observation is validated before any detector is touched;
//! 2. trust weights are snapshotted once;
//! 3. every registered detector runs on the blocking pool under a timeout,
//!    except one whose earlier timed-out call is still running, which
//!    fails the run's call with `Busy` instead;
//! 4. once every detector has returned, failed, or timed out, the
//!    successful predictions are aggregated against the snapshot;
//! 5. the sealed run is retained in the ledger for feedback.
//!
//! Nothing outside the pending run is mutated before step 5, so a caller
//! that drops the future mid-run leaves no trace.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{info, instrument, warn, Instrument};

use helios_aggregation::Aggregator;
use helios_core::config::HeliosConfig;
use helios_core::constants::VERSION;
use helios_core::errors::{DetectorError, HeliosError, HeliosResult};
use helios_core::models::{
    DetectorFailure, DetectorId, DetectorOutput, DetectorVerdict, EvaluationRun, FeedbackEvent,
    FeedbackOutcome, Observation, RunId,
};
use helios_detectors::{CallTicket, DetectorCatalog};
use helios_learning::{RecalibrationOutcome, Recalibrator};
use helios_observability::tracing_setup::events;
use helios_observability::{
    evaluation_span, recalibration_span, DegradationEvent, DegradationTracker, DetectorStatistics,
    HealthReport, HealthReporter, HealthSnapshot, SystemStatus,
};
use helios_trust::TrustRegistry;

use crate::ledger::RunLedger;
use crate::pending::PendingRun;
use crate::stats::SessionStats;

/// What the run did in place of a failed detector.
const EXCLUDED_FROM_RUN: &str = "excluded_from_run";

type Outcome = (DetectorId, Result<DetectorOutput, DetectorError>, u64);

/// Shared by every run; wrap in an `Arc` to submit from several tasks.
#[derive(Debug)]
pub struct Coordinator {
    config: HeliosConfig,
    catalog: DetectorCatalog,
    registry: Arc<TrustRegistry>,
    aggregator: Aggregator,
    recalibrator: Recalibrator,
    ledger: RunLedger,
    stats: SessionStats,
    degradation: Mutex<DegradationTracker>,
}

impl Coordinator {
    /// Build a coordinator over `catalog` with a fresh trust registry.
    pub fn new(config: HeliosConfig, catalog: DetectorCatalog) -> HeliosResult<Self> {
        let registry = Arc::new(TrustRegistry::new(&config.trust));
        Self::with_registry(config, catalog, registry)
    }

    /// A coordinator over the four built-in detectors.
    pub fn standard(config: HeliosConfig) -> HeliosResult<Self> {
        let catalog = DetectorCatalog::standard(&config.detectors);
        Self::new(config, catalog)
    }

    /// Build over an existing registry, e.g. one shared with another coordinator.
    ///
    /// Every catalog detector is registered at the default weight if the
    /// registry has not seen it.
    pub fn with_registry(
        config: HeliosConfig,
        catalog: DetectorCatalog,
        registry: Arc<TrustRegistry>,
    ) -> HeliosResult<Self> {
        config.validate()?;
        registry.register_all(catalog.ids())?;
        info!(
            detectors = catalog.len(),
            timeout_ms = config.session.detector_timeout_ms,
            retained_runs = config.session.max_retained_runs,
            "coordinator ready"
        );
        Ok(Self {
            aggregator: Aggregator::new(&config.aggregation),
            recalibrator: Recalibrator::new(&config.recalibration),
            ledger: RunLedger::new(config.session.max_retained_runs),
            stats: SessionStats::new(config.session.recent_window),
            degradation: Mutex::new(DegradationTracker::new()),
            config,
            catalog,
            registry,
        })
    }

    pub fn config(&self) -> &HeliosConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<TrustRegistry> {
        &self.registry
    }

    pub fn ledger(&self) -> &RunLedger {
        &self.ledger
    }

    pub fn detector_ids(&self) -> Vec<DetectorId> {
        self.catalog.ids().cloned().collect()
    }

    /// Evaluate with the configured per-detector timeout.
    pub async fn submit_observation(&self, observation: Observation) -> HeliosResult<Arc<EvaluationRun>> {
        self.submit_observation_with_timeout(observation, self.config.session.detector_timeout())
            .await
    }

    /// Evaluate with a caller-supplied per-detector timeout.
    #[instrument(skip_all, fields(timeout_ms = duration_ms(timeout)))]
    pub async fn submit_observation_with_timeout(
        &self,
        observation: Observation,
        timeout: Duration,
    ) -> HeliosResult<Arc<EvaluationRun>> {
        if let Err(e) = observation.validate() {
            events::run_failed(0, &e.to_string());
            return Err(e);
        }
        let fingerprint = observation.fingerprint()?;
        let weights = self.registry.snapshot()?;
        let pending = PendingRun::begin(observation, fingerprint, weights);

        let span = evaluation_span!(pending.id(), self.catalog.len());
        let shared = Arc::new(pending.observation().clone());
        let outcomes = self.collect(shared, timeout).instrument(span.clone()).await?;
        span.in_scope(|| self.seal(pending, outcomes))
    }

    /// Run every detector in parallel and wait for all of them.
    async fn collect(&self, observation: Arc<Observation>, timeout: Duration) -> HeliosResult<Vec<Outcome>> {
        let mut tasks = JoinSet::new();
        for adapter in self.catalog.adapters() {
            let adapter = adapter.clone();
            let observation = Arc::clone(&observation);
            tasks.spawn(async move {
                let id = adapter.id().clone();
                let started = Instant::now();
                // A detector still stuck in an abandoned call is not
                // dispatched again, so it cannot drain the blocking pool.
                let ticket = match adapter.begin_call() {
                    Ok(ticket) => ticket,
                    Err(busy) => return (id, Err(busy), 0),
                };
                let finisher = ticket.clone();
                // Dropped on every exit, including when the caller drops the
                // run. Abandoning an already finished call is a no-op.
                let _in_flight = AbandonOnDrop(ticket);
                let handle = tokio::task::spawn_blocking(move || {
                    let result = adapter.evaluate(&observation);
                    finisher.finish();
                    result
                });
                // On timeout the blocking thread runs on until the detector
                // returns; its result is dropped.
                let result = match tokio::time::timeout(timeout, handle).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(join)) => Err(DetectorError::Internal {
                        reason: join.to_string(),
                    }),
                    Err(_) => Err(DetectorError::TimedOut {
                        detector_id: id.to_string(),
                        timeout_ms: duration_ms(timeout),
                    }),
                };
                (id, result, duration_ms(started.elapsed()))
            });
        }

        let mut outcomes = Vec::with_capacity(self.catalog.len());
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.map_err(|e| HeliosError::ConcurrencyError(e.to_string()))?);
        }
        Ok(outcomes)
    }

    fn seal(&self, mut pending: PendingRun, outcomes: Vec<Outcome>) -> HeliosResult<Arc<EvaluationRun>> {
        let attempted = outcomes.len();
        for (detector_id, result, latency_ms) in outcomes {
            match result {
                Ok(output) => {
                    self.stats.record_detector_success(&detector_id);
                    pending.record_success(DetectorVerdict {
                        detector_id,
                        prediction: output.prediction,
                        explanation: output.explanation,
                        latency_ms,
                    })?;
                }
                Err(err) => {
                    events::detector_failed(detector_id.as_str(), err.kind(), &err.to_string());
                    self.stats.record_detector_failure(&detector_id);
                    pending.record_failure(DetectorFailure {
                        detector_id,
                        kind: err.kind().to_string(),
                        message: err.to_string(),
                        latency_ms,
                    })?;
                }
            }
        }

        pending.begin_aggregation()?;
        self.track_degradation(&pending)?;

        if pending.predictions().is_empty() {
            self.stats.record_run_failure();
            let failures: Vec<String> = pending
                .failures()
                .iter()
                .map(|f| format!("{}: {}", f.detector_id, f.message))
                .collect();
            events::run_failed(attempted, "all detectors failed");
            return Err(HeliosError::NoDetectorsAvailable {
                attempted,
                failures,
            });
        }

        let verdict = match self
            .aggregator
            .aggregate_verdicts(pending.predictions(), pending.weights().as_map())
        {
            Ok(verdict) => verdict,
            Err(e) => {
                self.stats.record_run_failure();
                events::run_failed(attempted, &e.to_string());
                return Err(e);
            }
        };

        let run = Arc::new(pending.seal(verdict)?);
        self.ledger.insert(Arc::clone(&run))?;
        self.stats.record_sealed(run.verdict().confidence)?;
        events::run_sealed(
            &run.id().to_string(),
            run.predictions().len(),
            run.failures().len(),
            run.verdict().aggregated_prediction,
            run.verdict().confidence,
        );
        Ok(run)
    }

    /// Failed detectors open a degradation; a success closes it.
    fn track_degradation(&self, pending: &PendingRun) -> HeliosResult<()> {
        let mut tracker = self.tracker()?;
        for failure in pending.failures() {
            if !tracker.is_degraded(failure.detector_id.as_str()) {
                tracker.record(DegradationEvent::new(
                    failure.detector_id.as_str(),
                    failure.kind.as_str(),
                    EXCLUDED_FROM_RUN,
                ));
            }
        }
        for verdict in pending.predictions() {
            tracker.mark_recovered(verdict.detector_id.as_str());
        }
        Ok(())
    }

    /// Apply feedback for a sealed run.
    pub fn submit_feedback(&self, run_id: RunId, outcome: FeedbackOutcome) -> HeliosResult<RecalibrationOutcome> {
        self.submit_feedback_event(FeedbackEvent::new(run_id, outcome))
    }

    /// Apply a feedback event. Each run accepts exactly one.
    ///
    /// Rejections (`UnknownRun`, `StaleFeedback`) leave the registry untouched.
    pub fn submit_feedback_event(&self, event: FeedbackEvent) -> HeliosResult<RecalibrationOutcome> {
        let _span = recalibration_span!(event.run_id).entered();
        let run_id = event.run_id;

        let run = match self.ledger.claim_for_feedback(run_id) {
            Ok(run) => run,
            Err(e) => {
                self.stats.record_rejection();
                events::feedback_rejected(&run_id.to_string(), &e.to_string());
                return Err(e);
            }
        };

        match self.recalibrator.recalibrate(&run, &event, &self.registry) {
            Ok(outcome) => {
                if let Err(e) = self.ledger.complete(run_id) {
                    warn!(run_id = %run_id, error = %e, "run left the ledger during recalibration");
                }
                self.stats.record_feedback(outcome.verdict_correct());
                events::weights_recalibrated(
                    &run_id.to_string(),
                    outcome.adjustments.len(),
                    outcome.label,
                    outcome.verdict_correct(),
                );
                Ok(outcome)
            }
            Err(e) => {
                if let Err(release) = self.ledger.release(run_id) {
                    warn!(run_id = %run_id, error = %release, "could not release feedback claim");
                }
                self.stats.record_rejection();
                events::feedback_rejected(&run_id.to_string(), &e.to_string());
                Err(e)
            }
        }
    }

    /// Current weights of every registered detector.
    pub fn current_trust_weights(&self) -> HeliosResult<BTreeMap<DetectorId, f64>> {
        Ok(self.registry.snapshot()?.into_map())
    }

    /// A retained sealed run.
    pub fn run(&self, id: &RunId) -> Option<Arc<EvaluationRun>> {
        self.ledger.get(id)
    }

    pub fn status(&self) -> HeliosResult<SystemStatus> {
        let weights = self.registry.snapshot()?;
        let default_weight = self.registry.config().default_weight;
        let tracker = self.tracker()?;

        let mut detectors = Vec::with_capacity(self.catalog.len());
        for id in self.catalog.ids() {
            let (successes, failures) = self.stats.detector_counts(id);
            detectors.push(DetectorStatistics {
                detector_id: id.to_string(),
                weight: weights.get(id).unwrap_or(default_weight),
                update_count: self.registry.update_count(id)?,
                successes,
                failures,
                degraded: tracker.is_degraded(id.as_str()),
            });
        }
        let health = HealthReporter::build(&self.health_snapshot(&tracker));
        drop(tracker);

        Ok(SystemStatus {
            version: VERSION.to_string(),
            sealed_runs: self.stats.sealed_runs(),
            failed_runs: self.stats.failed_runs(),
            retained_runs: self.ledger.len(),
            feedback_applied: self.stats.feedback_applied(),
            feedback_rejected: self.stats.feedback_rejected(),
            system_accuracy: self.stats.system_accuracy(),
            recent_confidences: self.stats.recent_confidences()?,
            detectors,
            health,
        })
    }

    pub fn health(&self) -> HeliosResult<HealthReport> {
        let tracker = self.tracker()?;
        Ok(HealthReporter::build(&self.health_snapshot(&tracker)))
    }

    fn health_snapshot(&self, tracker: &DegradationTracker) -> HealthSnapshot {
        HealthSnapshot::from_tracker(
            self.catalog.ids().map(|id| id.to_string()).collect(),
            tracker,
            self.stats.sealed_runs() + self.stats.failed_runs(),
            self.stats.failed_runs(),
        )
    }

    fn tracker(&self) -> HeliosResult<MutexGuard<'_, DegradationTracker>> {
        self.degradation
            .lock()
            .map_err(|e| HeliosError::ConcurrencyError(e.to_string()))
    }
}

/// Marks a detector call abandoned unless it has already returned.
struct AbandonOnDrop(CallTicket);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.abandon();
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
