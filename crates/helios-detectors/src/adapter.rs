//! Output normalization around any [`Detector`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Observation};
use helios_core::traits::Detector;
use tracing::debug;

/// Wraps one detector and enforces the output contract: the prediction is a
/// finite number in `[0, 1]`, and a panic inside the detector becomes a
/// [`DetectorError::Panicked`] instead of unwinding into the caller.
///
/// Clones share one count of calls that were abandoned by their caller
/// but are still running.
#[derive(Clone)]
pub struct DetectorAdapter {
    inner: Arc<dyn Detector>,
    stalled: Arc<AtomicUsize>,
}

impl DetectorAdapter {
    pub fn new(inner: Arc<dyn Detector>) -> Self {
        Self {
            inner,
            stalled: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn id(&self) -> &DetectorId {
        self.inner.id()
    }

    /// Abandoned calls that have not returned yet.
    pub fn stalled_calls(&self) -> usize {
        self.stalled.load(Ordering::Acquire)
    }

    /// Admit one call, or refuse with [`DetectorError::Busy`] while an
    /// abandoned call to this detector is still running.
    pub fn begin_call(&self) -> Result<CallTicket, DetectorError> {
        let stalled = self.stalled_calls();
        if stalled > 0 {
            return Err(DetectorError::Busy {
                detector_id: self.inner.id().to_string(),
                stalled,
            });
        }
        Ok(CallTicket {
            state: Arc::new(AtomicU8::new(CALL_RUNNING)),
            stalled: Arc::clone(&self.stalled),
        })
    }

    /// Evaluate and normalize.
    ///
    /// Non-finite predictions are rejected. Finite predictions outside the
    /// unit interval are clamped into it.
    pub fn evaluate(&self, observation: &Observation) -> Result<DetectorOutput, DetectorError> {
        let id = self.inner.id();
        let output = panic::catch_unwind(AssertUnwindSafe(|| self.inner.evaluate(observation)))
            .map_err(|payload| DetectorError::Panicked {
                detector_id: id.to_string(),
                message: panic_message(payload.as_ref()),
            })??;

        normalize(id, output)
    }
}

const CALL_RUNNING: u8 = 0;
const CALL_DONE: u8 = 1;
const CALL_ABANDONED: u8 = 2;

/// One admitted call. The evaluating side calls [`CallTicket::finish`]; a
/// caller that stops waiting calls [`CallTicket::abandon`]. The detector
/// counts as stalled from `abandon` until `finish`.
#[derive(Debug, Clone)]
pub struct CallTicket {
    state: Arc<AtomicU8>,
    stalled: Arc<AtomicUsize>,
}

impl CallTicket {
    /// The call returned.
    pub fn finish(&self) {
        if self.state.swap(CALL_DONE, Ordering::AcqRel) == CALL_ABANDONED {
            self.stalled.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// The caller gave up waiting. Returns false if the call had already
    /// returned.
    pub fn abandon(&self) -> bool {
        // Count first so `finish` never decrements below zero.
        self.stalled.fetch_add(1, Ordering::AcqRel);
        let abandoned = self
            .state
            .compare_exchange(CALL_RUNNING, CALL_ABANDONED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if !abandoned {
            self.stalled.fetch_sub(1, Ordering::AcqRel);
        }
        abandoned
    }
}

impl std::fmt::Debug for DetectorAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorAdapter")
            .field("id", self.inner.id())
            .finish()
    }
}

fn normalize(id: &DetectorId, mut output: DetectorOutput) -> Result<DetectorOutput, DetectorError> {
    let p = output.prediction;
    if !p.is_finite() {
        return Err(DetectorError::InvalidPrediction {
            detector_id: id.to_string(),
            value: p,
        });
    }
    if !(0.0..=1.0).contains(&p) {
        debug!(detector = %id, prediction = p, "clamping out-of-range prediction");
        output.prediction = p.clamp(0.0, 1.0);
    }
    Ok(output)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnDetector;
    use helios_core::models::Explanation;

    fn adapter(f: FnDetector) -> DetectorAdapter {
        DetectorAdapter::new(Arc::new(f))
    }

    #[test]
    fn in_range_output_passes_through() {
        let a = adapter(FnDetector::new("x", |_| {
            Ok(DetectorOutput::new(0.42, Explanation::Scalar(1.0)))
        }));
        let out = a.evaluate(&Observation::default()).unwrap();
        assert_eq!(out.prediction, 0.42);
        assert_eq!(out.explanation, Explanation::Scalar(1.0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let high = adapter(FnDetector::constant("high", 1.7));
        let low = adapter(FnDetector::constant("low", -0.2));
        assert_eq!(high.evaluate(&Observation::default()).unwrap().prediction, 1.0);
        assert_eq!(low.evaluate(&Observation::default()).unwrap().prediction, 0.0);
    }

    #[test]
    fn nan_is_rejected() {
        let a = adapter(FnDetector::constant("nan", f64::NAN));
        let err = a.evaluate(&Observation::default()).unwrap_err();
        assert_eq!(err.kind(), "invalid_prediction");
    }

    #[test]
    fn panic_becomes_error() {
        let a = adapter(FnDetector::new("boom", |_| panic!("model weights missing")));
        match a.evaluate(&Observation::default()) {
            Err(DetectorError::Panicked {
                detector_id,
                message,
            }) => {
                assert_eq!(detector_id, "boom");
                assert_eq!(message, "model weights missing");
            }
            other => panic!("expected Panicked, got {other:?}"),
        }
    }

    #[test]
    fn abandoned_call_blocks_new_calls_until_it_returns() {
        let a = adapter(FnDetector::constant("slow", 0.5));
        let clone = a.clone();

        let ticket = a.begin_call().unwrap();
        assert!(ticket.abandon());
        assert_eq!(clone.stalled_calls(), 1);
        match clone.begin_call() {
            Err(DetectorError::Busy { detector_id, stalled }) => {
                assert_eq!(detector_id, "slow");
                assert_eq!(stalled, 1);
            }
            other => panic!("expected Busy, got {other:?}"),
        }

        ticket.finish();
        assert_eq!(a.stalled_calls(), 0);
        assert!(a.begin_call().is_ok());
    }

    #[test]
    fn finished_call_cannot_be_abandoned() {
        let a = adapter(FnDetector::constant("fast", 0.5));
        let ticket = a.begin_call().unwrap();
        ticket.finish();
        assert!(!ticket.abandon());
        assert_eq!(a.stalled_calls(), 0);
    }

    #[test]
    fn concurrent_calls_are_admitted() {
        let a = adapter(FnDetector::constant("shared", 0.5));
        let first = a.begin_call().unwrap();
        let second = a.begin_call().unwrap();
        first.finish();
        second.finish();
        assert_eq!(a.stalled_calls(), 0);
    }

    #[test]
    fn detector_errors_propagate_unchanged() {
        let a = adapter(FnDetector::new("strict", |_| {
            Err(DetectorError::missing("noise"))
        }));
        assert_eq!(
            a.evaluate(&Observation::default()).unwrap_err(),
            DetectorError::missing("noise")
        );
    }
}
