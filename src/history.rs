//! Histories consulted by the solver while a simulation runs.
//!
//! Each state variable owns an append-only [`SwitchLog`]. Logs are stored side by side
//! and addressed by variable index; a delayed lookup always resolves to "the last
//! switch at or before the query time", so feedback through the logs never needs
//! back-references between variables.
//!
//! The model sees the delayed values through [`DelayedValues`], a dense
//! `delays x variables` matrix filled in before every evaluation.

use std::ops::Index;

use crate::error::{BdeError, Result};
use crate::series::BooleanTimeSeries;
use crate::utils::approx_eq;

/// Append-only record of the switch points of one state variable.
#[derive(Debug, Clone)]
pub(crate) struct SwitchLog {
    times: Vec<f64>,
    values: Vec<bool>,
}

impl SwitchLog {
    pub(crate) fn from_series(series: &BooleanTimeSeries) -> Self {
        Self {
            times: series.switch_times().to_vec(),
            values: series.values().to_vec(),
        }
    }

    pub(crate) fn last_value(&self) -> bool {
        self.values[self.values.len() - 1]
    }

    pub(crate) fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.times.len()
    }

    /// Value at time `t`, treating switches within `eps` after `t` as already happened.
    pub(crate) fn value_at(&self, t: f64, eps: f64) -> Result<bool> {
        if t < -eps {
            return Err(BdeError::Domain {
                time: t,
                horizon: self.last_time(),
            });
        }
        let q = t.max(0.0) + eps;
        Ok(self.values[self.times.partition_point(|&s| s <= q) - 1])
    }

    /// Records that the variable holds `value` from time `t` on.
    ///
    /// `t` must not precede the last switch. Returns `true` if the held value changed.
    /// Recording at the instant of the last switch overwrites it, and drops it
    /// entirely when the overwrite restores the value held before that switch.
    pub(crate) fn record(&mut self, t: f64, value: bool, eps: f64) -> bool {
        debug_assert!(t >= self.last_time() - eps);
        if value == self.last_value() {
            return false;
        }
        let n = self.times.len();
        if approx_eq(self.times[n - 1], t, eps) {
            if n >= 2 && self.values[n - 2] == value {
                self.times.pop();
                self.values.pop();
            } else {
                self.values[n - 1] = value;
            }
        } else {
            self.times.push(t);
            self.values.push(value);
        }
        true
    }

    pub(crate) fn into_series(self, horizon: f64) -> BooleanTimeSeries {
        BooleanTimeSeries::from_parts(self.times, self.values, horizon)
    }
}

/// Boolean values of several variables, each looked up at `t - delays[d]`.
///
/// Indexing follows the `z[d][v]` convention: the first index selects the delay slot,
/// the second one the variable.
///
/// ```
/// # use bde_rs::history::DelayedValues;
/// # fn check(z: &DelayedValues) {
/// let (tau1, x2) = (0, 1);
/// assert_eq!(z[tau1][x2], z.get(tau1, x2));
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayedValues {
    num_variables: usize,
    values: Vec<bool>,
}

impl DelayedValues {
    pub(crate) fn new(num_delays: usize, num_variables: usize) -> Self {
        Self {
            num_variables,
            values: vec![false; num_delays * num_variables],
        }
    }

    /// Value of variable `variable` at `t - delays[delay]`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, delay: usize, variable: usize) -> bool {
        self[delay][variable]
    }

    pub fn num_delays(&self) -> usize {
        if self.num_variables == 0 {
            0
        } else {
            self.values.len() / self.num_variables
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrites every entry with `lookup(delay, variable)`.
    pub(crate) fn fill(&mut self, mut lookup: impl FnMut(usize, usize) -> Result<bool>) -> Result<()> {
        let width = self.num_variables;
        for (i, slot) in self.values.iter_mut().enumerate() {
            *slot = lookup(i / width, i % width)?;
        }
        Ok(())
    }
}

impl Index<usize> for DelayedValues {
    type Output = [bool];

    fn index(&self, delay: usize) -> &Self::Output {
        let start = delay * self.num_variables;
        &self.values[start..start + self.num_variables]
    }
}
