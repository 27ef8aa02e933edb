//! Event-driven solver for boolean delay equations.
//!
//! # Algorithm
//!
//! The state of a boolean delay system is piecewise constant, so the only instants at
//! which an output can switch are the delayed images `s + tau` of earlier switches `s`
//! (of the state variables or of the forcing inputs). The solver therefore never steps
//! through time uniformly. It keeps an ascending queue of candidate instants instead:
//!
//! 1. The state histories define every variable on `[0, t0]`, where `t0` is their common
//!    horizon. The first evaluation happens at `t0`.
//! 2. Every switch `s` of a history or forcing input, shifted by every delay, is a
//!    candidate instant, as long as it lies in `[t0, end_time)`.
//! 3. Candidates are popped in ascending order. The model is evaluated on the values
//!    looked up at `t - tau` for every delay, and every variable whose value differs
//!    from the last recorded one gets a new switch at `t`.
//! 4. A switch at `t` is itself a new source of changes: `t + tau` is queued for every
//!    delay. With a zero delay this schedules `t` again, until the instant settles.
//!
//! The run ends when the queue is empty; every output is then defined up to `end_time`.
//!
//! Instants are compared with a tolerance `eps` (see [`SolverConfig`]), both when merging
//! candidates and when looking up delayed values, so that rounding in `s + tau - tau`
//! never loses a switch.
//!
//! # Examples
//!
//! A single variable that negates itself with a unit delay oscillates with period 2:
//!
//! ```
//! use bde_rs::history::DelayedValues;
//! use bde_rs::model::Unforced;
//! use bde_rs::series::BooleanTimeSeries;
//! use bde_rs::solver::BdeSolver;
//!
//! let history = BooleanTimeSeries::new(vec![0.0], &[true], 1.0).unwrap();
//! let solver = BdeSolver::new(Unforced(|z: &DelayedValues| vec![!z[0][0]]), vec![1.0], vec![history]);
//! let output = solver.solve(5.0).unwrap();
//!
//! assert_eq!(output[0].switch_times(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(output[0].values(), &[true, false, true, false, true]);
//! assert_eq!(output[0].horizon(), 5.0);
//! ```

use log::{debug, info};

use crate::error::{BdeError, Result};
use crate::history::{DelayedValues, SwitchLog};
use crate::model::Model;
use crate::queue::EventQueue;
use crate::series::BooleanTimeSeries;
use crate::utils::{approx_eq, definitely_less, tolerance_for};

/// Default number of evaluations allowed at a single instant.
pub const DEFAULT_MAX_EVALUATIONS_PER_INSTANT: usize = 1000;

/// Tunable parameters of a simulation run.
///
/// ```
/// use bde_rs::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_epsilon(1e-6)
///     .with_max_evaluations_per_instant(64);
/// assert_eq!(config.epsilon, Some(1e-6));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for comparing instants. `None` derives it from the smallest nonzero delay.
    pub epsilon: Option<f64>,
    /// Evaluations allowed at one instant before reporting a cyclic dependency.
    pub max_evaluations_per_instant: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: None,
            max_evaluations_per_instant: DEFAULT_MAX_EVALUATIONS_PER_INSTANT,
        }
    }
}

impl SolverConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn with_max_evaluations_per_instant(mut self, max: usize) -> Self {
        self.max_evaluations_per_instant = max;
        self
    }
}

/// Solver for a system of boolean delay equations.
///
/// The solver itself is immutable: every call to [`solve`][BdeSolver::solve] runs an
/// independent simulation from the initial histories, so one solver can be reused
/// (or shared across threads) for several end times.
#[derive(Debug, Clone)]
pub struct BdeSolver<M> {
    model: M,
    delays: Vec<f64>,
    histories: Vec<BooleanTimeSeries>,
    inputs: Vec<BooleanTimeSeries>,
    config: SolverConfig,
}

impl<M: Model> BdeSolver<M> {
    /// Creates a solver for `model` with the given delay slots and one initial
    /// history per state variable.
    pub fn new(model: M, delays: Vec<f64>, histories: Vec<BooleanTimeSeries>) -> Self {
        Self {
            model,
            delays,
            histories,
            inputs: Vec::new(),
            config: SolverConfig::default(),
        }
    }

    /// Adds forcing inputs, which must cover the whole simulated interval.
    pub fn with_forcing_inputs(mut self, inputs: Vec<BooleanTimeSeries>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    pub fn num_variables(&self) -> usize {
        self.histories.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The tolerance used for comparing instants.
    pub fn epsilon(&self) -> f64 {
        self.config.epsilon.unwrap_or_else(|| tolerance_for(&self.delays))
    }

    /// Runs the simulation up to `end_time`.
    ///
    /// Returns one series per state variable (in the order of the histories), each
    /// starting with its initial history and defined on `[0, end_time]`.
    /// If `end_time` does not go past the end of the histories, the histories are
    /// returned cut to `[0, end_time]` and the model is never evaluated.
    ///
    /// The first evaluation happens at the common end `t0` of the histories, and its
    /// result overrides the history at that instant: a history switch lying exactly
    /// at `t0` is kept only if the model agrees with it.
    ///
    /// # Errors
    ///
    /// - [`BdeError::Configuration`] if the setup is inconsistent: no state variables or
    ///   delays, a negative delay, histories with different horizons or shorter than the
    ///   largest delay, a non-positive `end_time`, forcing inputs ending before
    ///   `end_time`, or a model returning the wrong number of values.
    /// - [`BdeError::CyclicDependency`] if zero-delay feedback does not settle within
    ///   [`SolverConfig::max_evaluations_per_instant`] evaluations.
    /// - [`BdeError::Domain`] if a delayed lookup falls outside a series.
    pub fn solve(&self, end_time: f64) -> Result<Vec<BooleanTimeSeries>> {
        let eps = self.epsilon();
        let start_time = self.check(end_time, eps)?;
        if !definitely_less(start_time, end_time, eps) {
            info!(
                "solve(end_time = {}): within the histories ending at {}, nothing to evaluate",
                end_time, start_time
            );
            return self
                .histories
                .iter()
                .map(|h| h.cut(0.0, end_time.min(h.horizon())))
                .collect();
        }
        info!(
            "solve(end_time = {}): {} variables, {} inputs, delays = {:?}, start = {}, eps = {}",
            end_time,
            self.num_variables(),
            self.num_inputs(),
            self.delays,
            start_time,
            eps
        );

        let mut run = Run::new(self, start_time, end_time, eps);
        run.seed();
        while let Some(t) = run.queue.pop() {
            run.step(t)?;
        }
        info!(
            "solve finished: {} evaluations, {} switches",
            run.evaluations, run.switches
        );
        Ok(run.finish())
    }

    /// Validates the setup and returns the start time of the simulation.
    fn check(&self, end_time: f64, eps: f64) -> Result<f64> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(BdeError::config(format!("invalid tolerance {}", eps)));
        }
        if self.histories.is_empty() {
            return Err(BdeError::config("at least one state variable is required"));
        }
        if self.delays.is_empty() {
            return Err(BdeError::config("at least one delay is required"));
        }
        if let Some(d) = self.delays.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(BdeError::config(format!(
                "delays must be finite and non-negative, got {}",
                d
            )));
        }

        let start_time = self.histories[0].horizon();
        if let Some(h) = self
            .histories
            .iter()
            .find(|h| !approx_eq(h.horizon(), start_time, eps))
        {
            return Err(BdeError::config(format!(
                "the run starts at the common end of the histories, but they end at {} and {} (cut the longer ones)",
                start_time,
                h.horizon()
            )));
        }
        let max_delay = self.delays.iter().copied().fold(0.0, f64::max);
        if definitely_less(start_time, max_delay, eps) {
            return Err(BdeError::config(format!(
                "histories end at {}, before the largest delay {}",
                start_time, max_delay
            )));
        }
        if !end_time.is_finite() || end_time <= 0.0 {
            return Err(BdeError::config(format!(
                "end time must be finite and positive, got {}",
                end_time
            )));
        }
        if let Some(input) = self
            .inputs
            .iter()
            .find(|i| definitely_less(i.horizon(), end_time, eps))
        {
            return Err(BdeError::config(format!(
                "forcing input ends at {}, before the end time {}",
                input.horizon(),
                end_time
            )));
        }
        Ok(start_time)
    }
}

/// State of a single simulation run: the output logs and the remaining candidates.
struct Run<'a, M> {
    solver: &'a BdeSolver<M>,
    start_time: f64,
    end_time: f64,
    eps: f64,
    logs: Vec<SwitchLog>,
    queue: EventQueue,
    state: DelayedValues,
    forced: DelayedValues,
    /// The instant evaluated last and how many times it has been evaluated.
    instant: f64,
    instant_evaluations: usize,
    evaluations: usize,
    switches: usize,
}

impl<'a, M: Model> Run<'a, M> {
    fn new(solver: &'a BdeSolver<M>, start_time: f64, end_time: f64, eps: f64) -> Self {
        let num_delays = solver.delays.len();
        Self {
            solver,
            start_time,
            end_time,
            eps,
            logs: solver.histories.iter().map(SwitchLog::from_series).collect(),
            queue: EventQueue::new(eps),
            state: DelayedValues::new(num_delays, solver.num_variables()),
            forced: DelayedValues::new(num_delays, solver.num_inputs()),
            instant: f64::NEG_INFINITY,
            instant_evaluations: 0,
            evaluations: 0,
            switches: 0,
        }
    }

    /// Queues the start time and the delayed images of all known switches.
    fn seed(&mut self) {
        self.queue.push(self.start_time);
        let solver = self.solver;
        for series in solver.histories.iter().chain(&solver.inputs) {
            for &s in series.switch_times() {
                self.schedule(s);
            }
        }
        debug!("seeded {} candidate instants", self.queue.len());
    }

    /// Queues `t + tau` for every delay `tau` that lands inside the simulated interval.
    fn schedule(&mut self, t: f64) {
        for &tau in &self.solver.delays {
            let c = t + tau;
            if !definitely_less(c, self.start_time, self.eps) && definitely_less(c, self.end_time, self.eps) {
                self.queue.push(c);
            }
        }
    }

    /// Evaluates the model at `t` and records the resulting switches.
    fn step(&mut self, t: f64) -> Result<()> {
        if approx_eq(t, self.instant, self.eps) {
            self.instant_evaluations += 1;
        } else {
            self.instant = t;
            self.instant_evaluations = 1;
        }
        let budget = self.solver.config.max_evaluations_per_instant;
        if self.instant_evaluations > budget {
            return Err(BdeError::CyclicDependency {
                time: t,
                evaluations: self.instant_evaluations - 1,
            });
        }

        let (delays, eps) = (&self.solver.delays, self.eps);
        let logs = &self.logs;
        self.state.fill(|d, v| logs[v].value_at(t - delays[d], eps))?;
        let inputs = &self.solver.inputs;
        self.forced.fill(|d, i| inputs[i].value_at_within(t - delays[d], eps))?;

        let next = self.solver.model.eval(&self.state, &self.forced);
        self.evaluations += 1;
        if next.len() != self.logs.len() {
            return Err(BdeError::config(format!(
                "model returned {} values for {} state variables",
                next.len(),
                self.logs.len()
            )));
        }
        debug!("t = {}: next = {:?}", t, next);

        let mut changed = false;
        for (v, (log, value)) in self.logs.iter_mut().zip(next).enumerate() {
            if log.record(t, value, eps) {
                debug!("x{} := {} at t = {}", v, value, t);
                self.switches += 1;
                changed = true;
            }
        }
        if changed {
            self.schedule(t);
        }
        Ok(())
    }

    fn finish(self) -> Vec<BooleanTimeSeries> {
        let end_time = self.end_time;
        self.logs
            .into_iter()
            .enumerate()
            .map(|(v, log)| {
                debug!("x{}: {} switch points", v, log.len());
                log.into_series(end_time)
            })
            .collect()
    }
}
