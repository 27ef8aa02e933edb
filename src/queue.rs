//! Queue of candidate event times.

use std::collections::VecDeque;

use log::trace;

use crate::utils::approx_eq;

/// Ascending queue of instants at which some output may switch.
///
/// Instants within `eps` of an already queued instant are merged into it, so
/// delayed images of one switch that only differ by rounding are evaluated once.
#[derive(Debug, Clone)]
pub(crate) struct EventQueue {
    times: VecDeque<f64>,
    eps: f64,
}

impl EventQueue {
    pub(crate) fn new(eps: f64) -> Self {
        Self {
            times: VecDeque::new(),
            eps,
        }
    }

    /// Inserts `t` unless an instant within tolerance is already queued.
    ///
    /// Returns `true` if `t` was inserted.
    pub(crate) fn push(&mut self, t: f64) -> bool {
        let i = self.times.partition_point(|&s| s < t);
        let near = |j: usize| self.times.get(j).is_some_and(|&s| approx_eq(s, t, self.eps));
        if near(i) || (i > 0 && near(i - 1)) {
            return false;
        }
        trace!("queue candidate t = {}", t);
        self.times.insert(i, t);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<f64> {
        self.times.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.times.len()
    }
}
