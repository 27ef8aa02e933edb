//! Boolean step functions of time.
//!
//! A [`BooleanTimeSeries`] is a right-continuous, piecewise-constant boolean
//! function defined on `[0, horizon]`. It is stored as a list of switch points
//! `(time, value)`, where each value holds from its switch time until the next
//! one (or until the horizon for the last switch).
//!
//! ```text
//!   true  ┌────────┐          ┌──────┐
//!   false ┘        └──────────┘      ┆
//!         0        1.5        3      4 (horizon)
//! ```
//!
//! # Examples
//!
//! ```
//! use bde_rs::series::BooleanTimeSeries;
//!
//! let x = BooleanTimeSeries::new(vec![0.0, 1.5, 3.0], &[true, false, true], 4.0).unwrap();
//! assert_eq!(x.value_at(1.0).unwrap(), true);
//! assert_eq!(x.value_at(1.5).unwrap(), false);
//! assert_eq!(x.value_at(4.0).unwrap(), true);
//! assert!(x.value_at(4.5).is_err());
//! ```

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{BdeError, Result};
use crate::utils::{approx_eq, check_switch_times, definitely_less, EPSILON};

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanTimeSeries {
    switch_times: Vec<f64>,
    values: Vec<bool>,
    horizon: f64,
}

// Constructors
impl BooleanTimeSeries {
    /// Builds a series from explicit switch times, values and a horizon.
    ///
    /// Normally `values` has one entry per switch time. A shorter `values`
    /// sequence is tiled cyclically, i.e. switch `i` gets `values[i % values.len()]`.
    ///
    /// # Errors
    ///
    /// Returns [`BdeError::InvalidSeries`] if `times` is empty, does not start at 0,
    /// is not strictly increasing, if `values` is empty or longer than `times`,
    /// or if `horizon` precedes the last switch time.
    pub fn new(times: impl Into<Vec<f64>>, values: &[bool], horizon: f64) -> Result<Self> {
        let times = times.into();
        check_switch_times(&times).map_err(BdeError::InvalidSeries)?;
        if values.is_empty() {
            return Err(BdeError::invalid("values must not be empty"));
        }
        if values.len() > times.len() {
            return Err(BdeError::invalid(format!(
                "got {} values for {} switch times",
                values.len(),
                times.len()
            )));
        }
        let values = (0..times.len()).map(|i| values[i % values.len()]).collect();
        Self::with_horizon(times, values, horizon)
    }

    /// Builds a series whose value toggles at every switch time, starting from `initial`.
    ///
    /// This is the natural way to describe a square wave forcing input:
    ///
    /// ```
    /// use bde_rs::series::BooleanTimeSeries;
    ///
    /// let light = BooleanTimeSeries::alternating(vec![0.0, 0.5, 1.0, 1.5], false, 2.0).unwrap();
    /// assert_eq!(light.values(), &[false, true, false, true]);
    /// ```
    pub fn alternating(times: impl Into<Vec<f64>>, initial: bool, horizon: f64) -> Result<Self> {
        let times = times.into();
        check_switch_times(&times).map_err(BdeError::InvalidSeries)?;
        let values = (0..times.len()).map(|i| initial ^ (i % 2 == 1)).collect();
        Self::with_horizon(times, values, horizon)
    }

    /// Builds a series holding `value` on the whole of `[0, horizon]`.
    pub fn constant(value: bool, horizon: f64) -> Result<Self> {
        Self::with_horizon(vec![0.0], vec![value], horizon)
    }

    fn with_horizon(switch_times: Vec<f64>, values: Vec<bool>, horizon: f64) -> Result<Self> {
        let last = *switch_times.last().unwrap_or(&0.0);
        if !horizon.is_finite() || horizon < last {
            return Err(BdeError::invalid(format!(
                "horizon {} must be finite and not precede the last switch time {}",
                horizon, last
            )));
        }
        Ok(Self::from_parts(switch_times, values, horizon))
    }

    /// Assembles a series from parts that are already known to be valid.
    pub(crate) fn from_parts(switch_times: Vec<f64>, values: Vec<bool>, horizon: f64) -> Self {
        debug_assert_eq!(switch_times.len(), values.len());
        debug_assert_eq!(switch_times.first(), Some(&0.0));
        debug_assert!(switch_times.windows(2).all(|w| w[0] < w[1]));
        Self {
            switch_times,
            values,
            horizon,
        }
    }
}

// Getters
impl BooleanTimeSeries {
    pub fn switch_times(&self) -> &[f64] {
        &self.switch_times
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// The upper bound of the domain `[0, horizon]`.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// The number of recorded switch points, including the one at time zero.
    pub fn switch_count(&self) -> usize {
        self.switch_times.len()
    }

    pub fn initial_value(&self) -> bool {
        self.values[0]
    }

    pub fn final_value(&self) -> bool {
        self.values[self.values.len() - 1]
    }

    /// Iterates over the constant segments as `(from, to, value)` triples.
    ///
    /// Segments are half-open `[from, to)`, except the last one which ends at the horizon.
    pub fn segments(&self) -> impl Iterator<Item = (f64, f64, bool)> + '_ {
        let ends = self
            .switch_times
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(self.horizon));
        self.switch_times
            .iter()
            .copied()
            .zip(ends)
            .zip(self.values.iter().copied())
            .map(|((from, to), value)| (from, to, value))
    }
}

// Queries
impl BooleanTimeSeries {
    /// Returns the value at time `t`.
    ///
    /// The value at a switch time is the value that starts there (right continuity).
    ///
    /// # Errors
    ///
    /// Returns [`BdeError::Domain`] if `t` lies outside `[0, horizon]`.
    pub fn value_at(&self, t: f64) -> Result<bool> {
        if !(0.0..=self.horizon).contains(&t) {
            return Err(BdeError::Domain {
                time: t,
                horizon: self.horizon,
            });
        }
        Ok(self.values[self.index_at(t)])
    }

    /// Like [`value_at`][Self::value_at], but a switch within `eps` after `t`
    /// is considered to have already happened.
    pub(crate) fn value_at_within(&self, t: f64, eps: f64) -> Result<bool> {
        if t < -eps || t > self.horizon + eps {
            return Err(BdeError::Domain {
                time: t,
                horizon: self.horizon,
            });
        }
        Ok(self.values[self.index_at(t.max(0.0) + eps)])
    }

    /// Index of the last switch time `<= t`, for `t >= 0`.
    fn index_at(&self, t: f64) -> usize {
        // `switch_times[0] == 0 <= t`, so the partition point is at least 1.
        self.switch_times.partition_point(|&s| s <= t) - 1
    }
}

// Transformations
impl BooleanTimeSeries {
    /// Restricts the series to `[start, end]` and re-bases it so that `start` becomes time zero.
    ///
    /// # Errors
    ///
    /// Returns [`BdeError::InvalidSeries`] unless `0 <= start < end <= horizon`.
    pub fn cut(&self, start: f64, end: f64) -> Result<Self> {
        if start < 0.0 || start >= end || definitely_less(self.horizon, end, EPSILON) {
            return Err(BdeError::invalid(format!(
                "cannot cut [{}, {}] out of [0, {}]",
                start, end, self.horizon
            )));
        }
        let end = end.min(self.horizon);
        debug!("cut(start = {}, end = {}) of {}", start, end, self);

        let mut switch_times = vec![0.0];
        let mut values = vec![self.values[self.index_at(start)]];
        for (&s, &v) in self.switch_times.iter().zip(&self.values) {
            if s > start && s <= end {
                switch_times.push(s - start);
                values.push(v);
            }
        }
        Ok(Self::from_parts(switch_times, values, end - start))
    }

    /// Total time during which `self` and `other` disagree.
    ///
    /// This is the Lebesgue measure of `{t : self(t) != other(t)}` over the common
    /// horizon, so it is weighted by duration rather than by switch count.
    ///
    /// # Errors
    ///
    /// Returns [`BdeError::HorizonMismatch`] if the horizons are not equal (within tolerance).
    pub fn hamming_distance(&self, other: &BooleanTimeSeries) -> Result<f64> {
        if !approx_eq(self.horizon, other.horizon, EPSILON) {
            return Err(BdeError::HorizonMismatch {
                left: self.horizon,
                right: other.horizon,
            });
        }
        let horizon = self.horizon.min(other.horizon);

        let mut distance = 0.0;
        let (mut i, mut j) = (0, 0);
        let mut t = 0.0;
        loop {
            let next_i = self.switch_times.get(i + 1).copied().unwrap_or(horizon);
            let next_j = other.switch_times.get(j + 1).copied().unwrap_or(horizon);
            let next = next_i.min(next_j).min(horizon);
            if self.values[i] != other.values[j] {
                distance += next - t;
            }
            if next >= horizon {
                break;
            }
            if next_i == next {
                i += 1;
            }
            if next_j == next {
                j += 1;
            }
            t = next;
        }
        Ok(distance)
    }

    /// Hamming distance as a fraction of the horizon, in `[0, 1]`.
    pub fn relative_hamming_distance(&self, other: &BooleanTimeSeries) -> Result<f64> {
        let distance = self.hamming_distance(other)?;
        if self.horizon == 0.0 {
            return Ok(0.0);
        }
        Ok(distance / self.horizon)
    }
}

impl Display for BooleanTimeSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (t, v)) in self.switch_times.iter().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", t, if *v { 1 } else { 0 })?;
        }
        write!(f, "] until {}", self.horizon)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn series(times: &[f64], values: &[bool], horizon: f64) -> BooleanTimeSeries {
        BooleanTimeSeries::new(times.to_vec(), values, horizon).unwrap()
    }

    #[test]
    fn test_new() {
        let x = series(&[0.0, 1.0, 2.5], &[true, false, true], 3.0);
        assert_eq!(x.switch_times(), &[0.0, 1.0, 2.5]);
        assert_eq!(x.values(), &[true, false, true]);
        assert_eq!(x.horizon(), 3.0);
        assert_eq!(x.switch_count(), 3);
        assert_eq!(x.initial_value(), true);
        assert_eq!(x.final_value(), true);
    }

    #[test]
    fn test_new_tiles_short_values() {
        let x = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[true, false], 5.0);
        assert_eq!(x.values(), &[true, false, true, false, true]);

        let y = series(&[0.0, 0.5, 1.0], &[false], 3.0);
        assert_eq!(y.values(), &[false, false, false]);
    }

    #[test]
    fn test_new_rejects_malformed() {
        let empty: Vec<f64> = vec![];
        assert!(matches!(
            BooleanTimeSeries::new(empty, &[true], 1.0),
            Err(BdeError::InvalidSeries(_))
        ));
        assert!(BooleanTimeSeries::new(vec![1.0], &[true], 2.0).is_err());
        assert!(BooleanTimeSeries::new(vec![0.0, 2.0, 1.0], &[true], 3.0).is_err());
        assert!(BooleanTimeSeries::new(vec![0.0, 1.0], &[], 3.0).is_err());
        assert!(BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false, true], 3.0).is_err());
        assert!(BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false], 0.5).is_err());
        assert!(BooleanTimeSeries::new(vec![0.0], &[true], f64::NAN).is_err());
    }

    #[test]
    fn test_alternating() {
        let x = BooleanTimeSeries::alternating(vec![0.0, 1.0, 2.0], true, 3.0).unwrap();
        assert_eq!(x.values(), &[true, false, true]);
        let y = BooleanTimeSeries::alternating(vec![0.0, 1.0], false, 1.0).unwrap();
        assert_eq!(y.values(), &[false, true]);
    }

    #[test]
    fn test_value_at() {
        let x = series(&[0.0, 1.5, 3.0], &[true, false, true], 4.0);
        assert_eq!(x.value_at(0.0), Ok(true));
        assert_eq!(x.value_at(1.4999), Ok(true));
        assert_eq!(x.value_at(1.5), Ok(false));
        assert_eq!(x.value_at(2.0), Ok(false));
        assert_eq!(x.value_at(3.0), Ok(true));
        assert_eq!(x.value_at(4.0), Ok(true));
    }

    #[test]
    fn test_value_at_outside_domain() {
        let x = series(&[0.0], &[true], 1.0);
        assert_eq!(
            x.value_at(-0.5),
            Err(BdeError::Domain {
                time: -0.5,
                horizon: 1.0
            })
        );
        assert!(matches!(x.value_at(1.5), Err(BdeError::Domain { .. })));
    }

    #[test]
    fn test_value_at_within() {
        let x = series(&[0.0, 0.3], &[true, false], 1.0);
        let t = 0.1 + 0.2 - 1e-12;
        assert_eq!(x.value_at(t), Ok(true));
        assert_eq!(x.value_at_within(t, 1e-9), Ok(false));
        assert_eq!(x.value_at_within(-1e-12, 1e-9), Ok(true));
        assert!(x.value_at_within(-1e-3, 1e-9).is_err());
    }

    #[test]
    fn test_segments() {
        let x = series(&[0.0, 1.0, 2.5], &[true, false, true], 3.0);
        let segments: Vec<_> = x.segments().collect();
        assert_eq!(
            segments,
            vec![(0.0, 1.0, true), (1.0, 2.5, false), (2.5, 3.0, true)]
        );
    }

    #[test]
    fn test_cut() {
        let x = series(&[0.0, 1.0, 2.0, 3.0], &[true, false, true, false], 4.0);

        let y = x.cut(0.5, 2.5).unwrap();
        assert_eq!(y.switch_times(), &[0.0, 0.5, 1.5]);
        assert_eq!(y.values(), &[true, false, true]);
        assert_eq!(y.horizon(), 2.0);

        // A switch exactly at `start` becomes the synthetic switch at zero.
        let z = x.cut(1.0, 4.0).unwrap();
        assert_eq!(z.switch_times(), &[0.0, 1.0, 2.0]);
        assert_eq!(z.values(), &[false, true, false]);
        assert_eq!(z.horizon(), 3.0);
    }

    #[test]
    fn test_cut_preserves_values() {
        let x = series(&[0.0, 0.7, 1.9, 2.2, 3.6], &[false, true, false, true, false], 5.0);
        let (a, b) = (0.4, 3.7);
        let y = x.cut(a, b).unwrap();
        for k in 0..65 {
            let t = k as f64 * 0.05 + 0.01;
            assert_eq!(y.value_at(t).unwrap(), x.value_at(a + t).unwrap(), "t = {}", t);
        }
    }

    #[test]
    fn test_cut_rejects_bad_bounds() {
        let x = series(&[0.0, 1.0], &[true, false], 2.0);
        assert!(x.cut(1.0, 1.0).is_err());
        assert!(x.cut(1.5, 1.0).is_err());
        assert!(x.cut(-0.5, 1.0).is_err());
        assert!(x.cut(0.0, 2.5).is_err());
        assert!(x.cut(0.0, 2.0).is_ok());
    }

    #[test]
    fn test_hamming_distance() {
        let x = series(&[0.0, 1.0, 3.0], &[true, false, true], 4.0);
        let y = series(&[0.0, 2.0], &[true, false], 4.0);
        // Disagree on [1, 2) only where x is false and y is true, and on [3, 4).
        assert_eq!(x.hamming_distance(&y), Ok(2.0));
        assert_eq!(y.hamming_distance(&x), Ok(2.0));
        assert_eq!(x.hamming_distance(&x), Ok(0.0));
        assert_eq!(x.relative_hamming_distance(&y), Ok(0.5));
    }

    #[test]
    fn test_hamming_distance_complement() {
        let x = series(&[0.0, 0.25, 0.75], &[true, false, true], 1.0);
        let y = series(&[0.0, 0.25, 0.75], &[false, true, false], 1.0);
        assert_eq!(x.hamming_distance(&y), Ok(1.0));
    }

    #[test]
    fn test_hamming_distance_horizon_mismatch() {
        let x = series(&[0.0], &[true], 1.0);
        let y = series(&[0.0], &[true], 2.0);
        assert_eq!(
            x.hamming_distance(&y),
            Err(BdeError::HorizonMismatch {
                left: 1.0,
                right: 2.0
            })
        );
    }

    #[test]
    fn test_display() {
        let x = series(&[0.0, 1.5], &[true, false], 2.0);
        assert_eq!(x.to_string(), "[0: 1, 1.5: 0] until 2");
    }
}
