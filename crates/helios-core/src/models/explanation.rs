//! Detector explanation payloads.
//!
//! A payload is aggregatable when it exposes numeric features of a known
//! shape. Opaque payloads travel with the run but never enter the
//! weighted-mean explanation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DetectorId;

/// Free-form explanation attached to a detector prediction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Explanation {
    #[default]
    None,
    Scalar(f64),
    Vector(Vec<f64>),
    Features(BTreeMap<String, f64>),
    Opaque(serde_json::Value),
}

/// Shape of an aggregatable explanation. Two payloads may be averaged only
/// when their shapes are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplanationShape {
    Scalar,
    Vector { len: usize },
    Features { keys: Vec<String> },
}

impl Explanation {
    /// Build a feature map from `(name, value)` pairs.
    pub fn features<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::Features(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The aggregatable shape, or `None` for empty, opaque, or non-finite payloads.
    pub fn shape(&self) -> Option<ExplanationShape> {
        match self {
            Self::None | Self::Opaque(_) => None,
            Self::Scalar(v) => v.is_finite().then_some(ExplanationShape::Scalar),
            Self::Vector(values) => (!values.is_empty() && values.iter().all(|v| v.is_finite()))
                .then(|| ExplanationShape::Vector { len: values.len() }),
            Self::Features(map) => (!map.is_empty() && map.values().all(|v| v.is_finite()))
                .then(|| ExplanationShape::Features {
                    keys: map.keys().cloned().collect(),
                }),
        }
    }

    /// Flatten the numeric content in shape order (`BTreeMap` key order for features).
    pub fn components(&self) -> Vec<f64> {
        match self {
            Self::None | Self::Opaque(_) => Vec::new(),
            Self::Scalar(v) => vec![*v],
            Self::Vector(values) => values.clone(),
            Self::Features(map) => map.values().copied().collect(),
        }
    }

    /// Rebuild an explanation of `shape` from flattened components.
    pub fn from_components(shape: &ExplanationShape, components: Vec<f64>) -> Self {
        match shape {
            ExplanationShape::Scalar => Self::Scalar(components.first().copied().unwrap_or(0.0)),
            ExplanationShape::Vector { .. } => Self::Vector(components),
            ExplanationShape::Features { keys } => {
                Self::Features(keys.iter().cloned().zip(components).collect())
            }
        }
    }

    /// Look up a named feature.
    pub fn feature(&self, name: &str) -> Option<f64> {
        match self {
            Self::Features(map) => map.get(name).copied(),
            _ => None,
        }
    }
}

/// One detector's normalized share of the total weight in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightShare {
    pub detector_id: DetectorId,
    /// `wᵢ / Σw`, in `[0, 1]`.
    pub share: f64,
}

/// Weighted-mean explanation across the detectors of one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedExplanation {
    /// `Σ(wᵢ·eᵢ) / Σ(wᵢ)` over the compatible contributors, if any.
    pub value: Option<Explanation>,
    pub shape: Option<ExplanationShape>,
    /// Detectors whose payloads entered `value`.
    pub contributors: Vec<DetectorId>,
    /// Detectors whose payloads were empty, opaque, or of another shape.
    pub excluded: Vec<DetectorId>,
    /// Every predicting detector's weight share, largest first.
    pub shares: Vec<WeightShare>,
    /// Detector with the largest share.
    pub primary: Option<DetectorId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_shape_uses_sorted_keys() {
        let e = Explanation::features([("b", 2.0), ("a", 1.0)]);
        assert_eq!(
            e.shape(),
            Some(ExplanationShape::Features {
                keys: vec!["a".to_string(), "b".to_string()]
            })
        );
        assert_eq!(e.components(), vec![1.0, 2.0]);
    }

    #[test]
    fn opaque_and_non_finite_have_no_shape() {
        assert_eq!(Explanation::Opaque(serde_json::json!({"x": 1})).shape(), None);
        assert_eq!(Explanation::Scalar(f64::NAN).shape(), None);
        assert_eq!(Explanation::Vector(vec![]).shape(), None);
    }

    #[test]
    fn components_round_trip_through_shape() {
        let e = Explanation::features([("depth", 0.01), ("ppm", 10_000.0)]);
        let shape = e.shape().unwrap();
        assert_eq!(Explanation::from_components(&shape, e.components()), e);
    }
}
