//! Floating-point helpers for comparing instants on the time axis.
//!
//! Switch times are produced by repeatedly adding delays together, so two
//! instants that are equal on paper can differ in their last few bits
//! (`0.1 + 0.2 != 0.3`). Everything that compares instants goes through
//! the helpers below with an explicit tolerance.

/// Absolute tolerance used when nothing better is known.
pub const EPSILON: f64 = 1e-9;

/// Tolerance relative to the smallest nonzero delay of a system.
pub const RELATIVE_EPSILON: f64 = 1e-9;

/// Returns `true` if `a` and `b` are within `eps` of each other.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Returns `true` if `a` is smaller than `b` by more than `eps`.
pub fn definitely_less(a: f64, b: f64, eps: f64) -> bool {
    a < b - eps
}

/// Derives the instant tolerance for a set of delays.
///
/// The tolerance scales with the smallest nonzero delay so that two distinct
/// delayed images of one switch are never merged. When every delay is zero
/// (or there are none) the absolute [`EPSILON`] is used.
pub fn tolerance_for(delays: &[f64]) -> f64 {
    delays
        .iter()
        .copied()
        .filter(|&d| d > 0.0)
        .min_by(f64::total_cmp)
        .map_or(EPSILON, |d| d * RELATIVE_EPSILON)
}

/// Checks that `times` is non-empty, starts at zero and is strictly increasing.
pub(crate) fn check_switch_times(times: &[f64]) -> Result<(), String> {
    let Some(&first) = times.first() else {
        return Err("switch times must not be empty".to_string());
    };
    if first != 0.0 {
        return Err(format!("first switch time must be 0, got {}", first));
    }
    if let Some(w) = times.windows(2).find(|w| !(w[0] < w[1])) {
        return Err(format!(
            "switch times must be strictly increasing, got {} followed by {}",
            w[0], w[1]
        ));
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(format!("switch times must be finite, got {}", t));
    }
    Ok(())
}
