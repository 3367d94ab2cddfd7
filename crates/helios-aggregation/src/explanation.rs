//! Weighted-mean aggregation of explanation payloads.
//!
//! `E = Σ(wᵢ·eᵢ) / Σ(wᵢ)` over the payloads that share the reference shape.
//! The reference shape is the one carrying the most total weight; ties go
//! to the shape whose first contributor sorts first by id. Payloads of any
//! other shape, and payloads with no numeric shape, are excluded and listed.

use std::cmp::Ordering;

use helios_core::models::{AggregatedExplanation, DetectorId, Explanation, ExplanationShape, WeightShare};
use tracing::debug;

use crate::aggregator::Contribution;

struct ShapeGroup<'a> {
    shape: ExplanationShape,
    total_weight: f64,
    first_id: &'a DetectorId,
}

/// Aggregate the explanations of `contributions`, which must be sorted by id.
pub fn aggregate_explanations(contributions: &[Contribution<'_>]) -> AggregatedExplanation {
    let total_weight: f64 = contributions.iter().map(|c| c.weight).sum();
    let shares = weight_shares(contributions, total_weight);
    let primary = shares.first().map(|s| s.detector_id.clone());

    let Some(reference) = reference_shape(contributions) else {
        return AggregatedExplanation {
            excluded: contributions.iter().map(|c| c.detector_id.clone()).collect(),
            shares,
            primary,
            ..Default::default()
        };
    };

    let mut contributors = Vec::new();
    let mut excluded = Vec::new();
    let mut sums = Vec::new();
    let mut weight = 0.0;
    for c in contributions {
        let shape = c.explanation.and_then(Explanation::shape);
        if shape.as_ref() != Some(&reference) {
            excluded.push(c.detector_id.clone());
            continue;
        }
        let components = c.explanation.map(Explanation::components).unwrap_or_default();
        if sums.is_empty() {
            sums = vec![0.0; components.len()];
        }
        for (sum, v) in sums.iter_mut().zip(components) {
            *sum += c.weight * v;
        }
        weight += c.weight;
        contributors.push(c.detector_id.clone());
    }

    if !excluded.is_empty() {
        debug!(
            excluded = excluded.len(),
            contributors = contributors.len(),
            "explanations of incompatible shape left out of the aggregate"
        );
    }

    let value = (weight > 0.0).then(|| {
        let mean = sums.into_iter().map(|s| s / weight).collect();
        Explanation::from_components(&reference, mean)
    });

    AggregatedExplanation {
        value,
        shape: Some(reference),
        contributors,
        excluded,
        shares,
        primary,
    }
}

/// Every contributor's `wᵢ / Σw`, largest first, ties by id.
fn weight_shares(contributions: &[Contribution<'_>], total_weight: f64) -> Vec<WeightShare> {
    if total_weight <= 0.0 {
        return Vec::new();
    }
    let mut shares: Vec<WeightShare> = contributions
        .iter()
        .map(|c| WeightShare {
            detector_id: c.detector_id.clone(),
            share: c.weight / total_weight,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.share
            .partial_cmp(&a.share)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.detector_id.cmp(&b.detector_id))
    });
    shares
}

fn reference_shape(contributions: &[Contribution<'_>]) -> Option<ExplanationShape> {
    let mut groups: Vec<ShapeGroup<'_>> = Vec::new();
    for c in contributions {
        let Some(shape) = c.explanation.and_then(Explanation::shape) else {
            continue;
        };
        match groups.iter_mut().find(|g| g.shape == shape) {
            Some(g) => {
                g.total_weight += c.weight;
                if c.detector_id < g.first_id {
                    g.first_id = c.detector_id;
                }
            }
            None => groups.push(ShapeGroup {
                shape,
                total_weight: c.weight,
                first_id: c.detector_id,
            }),
        }
    }
    groups
        .into_iter()
        .max_by(|a, b| {
            a.total_weight
                .partial_cmp(&b.total_weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.first_id.cmp(a.first_id))
        })
        .map(|g| g.shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DetectorId {
        DetectorId::from(s)
    }

    #[test]
    fn compatible_vectors_are_averaged_by_weight() {
        let (a, b) = (id("a"), id("b"));
        let ea = Explanation::Vector(vec![1.0, 0.0]);
        let eb = Explanation::Vector(vec![0.0, 1.0]);
        let contributions = [
            Contribution::new(&a, 0.5, 3.0, Some(&ea)),
            Contribution::new(&b, 0.5, 1.0, Some(&eb)),
        ];
        let agg = aggregate_explanations(&contributions);
        assert_eq!(agg.value, Some(Explanation::Vector(vec![0.75, 0.25])));
        assert_eq!(agg.contributors, vec![a.clone(), b]);
        assert!(agg.excluded.is_empty());
        assert_eq!(agg.primary, Some(a));
        assert_eq!(agg.shares[0].share, 0.75);
    }

    #[test]
    fn minority_shape_is_excluded() {
        let (a, b, c) = (id("a"), id("b"), id("c"));
        let scalar_a = Explanation::Scalar(2.0);
        let scalar_b = Explanation::Scalar(4.0);
        let vector = Explanation::Vector(vec![9.0, 9.0, 9.0]);
        let contributions = [
            Contribution::new(&a, 0.5, 1.0, Some(&scalar_a)),
            Contribution::new(&b, 0.5, 1.0, Some(&scalar_b)),
            Contribution::new(&c, 0.5, 1.5, Some(&vector)),
        ];
        let agg = aggregate_explanations(&contributions);
        assert_eq!(agg.shape, Some(ExplanationShape::Scalar));
        assert_eq!(agg.value, Some(Explanation::Scalar(3.0)));
        assert_eq!(agg.excluded, vec![c.clone()]);
        // c still has the largest individual share.
        assert_eq!(agg.primary, Some(c));
    }

    #[test]
    fn weight_tie_goes_to_first_detector_id() {
        let (a, b) = (id("alpha"), id("beta"));
        let ea = Explanation::Scalar(1.0);
        let eb = Explanation::Vector(vec![1.0, 2.0]);
        let contributions = [
            Contribution::new(&a, 0.5, 1.0, Some(&ea)),
            Contribution::new(&b, 0.5, 1.0, Some(&eb)),
        ];
        let agg = aggregate_explanations(&contributions);
        assert_eq!(agg.shape, Some(ExplanationShape::Scalar));
        assert_eq!(agg.contributors, vec![a.clone()]);
        assert_eq!(agg.primary, Some(a));
    }

    #[test]
    fn no_numeric_payloads_still_reports_shares() {
        let (a, b) = (id("a"), id("b"));
        let opaque = Explanation::Opaque(serde_json::json!({"note": "visual"}));
        let contributions = [
            Contribution::new(&a, 0.5, 1.0, None),
            Contribution::new(&b, 0.5, 1.0, Some(&opaque)),
        ];
        let agg = aggregate_explanations(&contributions);
        assert_eq!(agg.value, None);
        assert_eq!(agg.shape, None);
        assert_eq!(agg.excluded.len(), 2);
        assert_eq!(agg.shares.len(), 2);
    }
}
