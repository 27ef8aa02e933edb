//! # bde-rs: Boolean Delay Equations in Rust
//!
//! **`bde-rs`** simulates systems of **Boolean Delay Equations (BDEs)**: sets of boolean
//! variables whose value at time `t` is a boolean function of the values of the system
//! (and of external forcing inputs) at earlier times `t - tau`.
//! The delays `tau` are arbitrary non-negative reals, so time is continuous.
//!
//! ## What is a BDE?
//!
//! A BDE system with variables `x1..xn` and delays `tau1..taum` is written as
//!
//! ```text
//! x1(t) = f1( x(t - tau1), ..., x(t - taum), u(t - tau1), ..., u(t - taum) )
//! ...
//! xn(t) = fn( ... )
//! ```
//!
//! where `u` are forcing inputs. Given the values of every variable on an initial
//! history interval, the solution is a set of piecewise-constant boolean functions.
//! Because nothing changes between switches, the solver is **event-driven**: it only
//! evaluates the equations at the delayed images of earlier switches.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bde_rs::history::DelayedValues;
//! use bde_rs::model::Unforced;
//! use bde_rs::series::BooleanTimeSeries;
//! use bde_rs::solver::BdeSolver;
//!
//! // 1. Describe the equations: x1(t) = x2(t - 1), x2(t) = NOT x1(t - 0.5)
//! let (x1, x2) = (0, 1);
//! let (tau1, tau2) = (0, 1);
//! let model = Unforced(move |z: &DelayedValues| vec![z[tau1][x2], !z[tau2][x1]]);
//!
//! // 2. Provide a history for each variable, covering at least the largest delay
//! let x1_history = BooleanTimeSeries::new(vec![0.0, 1.5], &[true, false], 2.0).unwrap();
//! let x2_history = BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false], 2.0).unwrap();
//!
//! // 3. Solve
//! let solver = BdeSolver::new(model, vec![1.0, 0.5], vec![x1_history, x2_history]);
//! let output = solver.solve(6.0).unwrap();
//!
//! assert_eq!(output[0].switch_times(), &[0.0, 1.5, 3.0, 4.5]);
//! assert_eq!(output[1].switch_times(), &[0.0, 1.0, 2.0, 3.5, 5.0]);
//! ```
//!
//! ## Core Components
//!
//! - **[`series`]**: The [`BooleanTimeSeries`][crate::series::BooleanTimeSeries] step function:
//!   construction, lookup, cutting and Hamming distance.
//! - **[`threshold`]**: Turning continuous experiment data into boolean time series.
//! - **[`solver`]**: The event-driven [`BdeSolver`][crate::solver::BdeSolver].
//! - **[`plot`]**: Plain-data output for external plotting tools.

pub mod error;
pub mod history;
pub mod model;
pub mod plot;
mod queue;
pub mod series;
pub mod solver;
pub mod threshold;
pub mod utils;
