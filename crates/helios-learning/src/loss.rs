//! Binary cross-entropy and its derivative with respect to the prediction.

/// Clamp `p` into `[floor, ceiling]` so neither log term is singular.
pub fn clamp_prediction(p: f64, floor: f64, ceiling: f64) -> f64 {
    if p.is_nan() {
        return floor;
    }
    p.clamp(floor, ceiling)
}

/// `L = −h·ln(P) − (1−h)·ln(1−P)`. `p` must already be clamped.
pub fn binary_cross_entropy(p: f64, label: bool) -> f64 {
    if label {
        -p.ln()
    } else {
        -(1.0 - p).ln()
    }
}

/// `∂L/∂P = −h/P + (1−h)/(1−P)`. `p` must already be clamped.
pub fn loss_gradient(p: f64, label: bool) -> f64 {
    if label {
        -1.0 / p
    } else {
        1.0 / (1.0 - p)
    }
}
