//! Weighted first and second moments.

/// Mean and variance of a weighted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedStats {
    pub mean: f64,
    pub variance: f64,
    pub total_weight: f64,
}

impl WeightedStats {
    /// Returns `None` if `samples` is empty or the weights sum to zero.
    pub fn compute(samples: &[(f64, f64)]) -> Option<Self> {
        let mean = weighted_mean(samples)?;
        let variance = weighted_variance(samples, mean)?;
        Some(Self {
            mean,
            variance,
            total_weight: samples.iter().map(|(_, w)| w).sum(),
        })
    }
}

/// `Σ(wᵢ·xᵢ) / Σ(wᵢ)` over `(xᵢ, wᵢ)` pairs.
pub fn weighted_mean(samples: &[(f64, f64)]) -> Option<f64> {
    let total: f64 = samples.iter().map(|(_, w)| w).sum();
    if samples.is_empty() || total <= 0.0 {
        return None;
    }
    Some(samples.iter().map(|(x, w)| w * x).sum::<f64>() / total)
}

/// `Σ(wᵢ·(xᵢ − mean)²) / Σ(wᵢ)`.
pub fn weighted_variance(samples: &[(f64, f64)], mean: f64) -> Option<f64> {
    let total: f64 = samples.iter().map(|(_, w)| w).sum();
    if samples.is_empty() || total <= 0.0 {
        return None;
    }
    let sum: f64 = samples
        .iter()
        .map(|(x, w)| {
            let d = x - mean;
            w * d * d
        })
        .sum();
    Some((sum / total).max(0.0))
}
