//! Conversion of continuous samples into boolean step functions.
//!
//! Experimental data (e.g. expression levels measured over time) is turned into a
//! [`BooleanTimeSeries`] by comparing each sample against a threshold level. Only
//! the samples where the thresholded value actually changes become switch points.

use log::debug;

use crate::error::{BdeError, Result};
use crate::series::BooleanTimeSeries;
use crate::utils::check_switch_times;

/// Thresholds `samples` at `min + fraction * (max - min)`.
///
/// Each sample maps to `sample >= level`. The resulting series starts at the first
/// sample time (which must be zero) and ends at the last one.
///
/// # Examples
///
/// ```
/// use bde_rs::threshold::relative_threshold;
///
/// let times = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let samples = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let x = relative_threshold(&times, &samples, 0.5).unwrap();
/// assert_eq!(x.switch_times(), &[0.0, 2.0]);
/// assert_eq!(x.values(), &[false, true]);
/// assert_eq!(x.horizon(), 4.0);
/// ```
///
/// # Errors
///
/// Returns [`BdeError::InvalidSeries`] if the inputs are empty, differ in length,
/// contain non-finite samples, or if the sample times are not strictly increasing from zero.
pub fn relative_threshold(times: &[f64], samples: &[f64], fraction: f64) -> Result<BooleanTimeSeries> {
    check_samples(times, samples)?;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let level = min + fraction * (max - min);
    debug!(
        "relative_threshold(fraction = {}): min = {}, max = {}, level = {}",
        fraction, min, max, level
    );
    Ok(threshold_unchecked(times, samples, level))
}

/// Thresholds `samples` at a fixed `level`: each sample maps to `sample >= level`.
pub fn absolute_threshold(times: &[f64], samples: &[f64], level: f64) -> Result<BooleanTimeSeries> {
    check_samples(times, samples)?;
    debug!("absolute_threshold(level = {})", level);
    Ok(threshold_unchecked(times, samples, level))
}

fn check_samples(times: &[f64], samples: &[f64]) -> Result<()> {
    if times.len() != samples.len() {
        return Err(BdeError::invalid(format!(
            "got {} sample times but {} sample values",
            times.len(),
            samples.len()
        )));
    }
    check_switch_times(times).map_err(|e| BdeError::invalid(format!("bad sample times: {}", e)))?;
    if let Some(y) = samples.iter().find(|y| !y.is_finite()) {
        return Err(BdeError::invalid(format!("sample values must be finite, got {}", y)));
    }
    Ok(())
}

fn threshold_unchecked(times: &[f64], samples: &[f64], level: f64) -> BooleanTimeSeries {
    let mut switch_times = vec![times[0]];
    let mut values = vec![samples[0] >= level];
    for (&t, &y) in times.iter().zip(samples).skip(1) {
        let value = y >= level;
        if value != values[values.len() - 1] {
            switch_times.push(t);
            values.push(value);
        }
    }
    let horizon = times[times.len() - 1];
    BooleanTimeSeries::from_parts(switch_times, values, horizon)
}
