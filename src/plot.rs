//! Presentation helpers for boolean time series.
//!
//! The library never draws anything itself. Instead, this module turns series into
//! plain data that an external plotting tool can consume:
//!
//! - [`step_points`] produces the vertices of a step plot, optionally scaled and offset
//!   so that a boolean trace can be overlaid on continuous experiment data.
//! - [`to_data_blocks`] renders several labelled traces as whitespace-separated data
//!   blocks (one per trace, separated by two blank lines), as understood by gnuplot's
//!   `index` keyword and most spreadsheet importers.
//! - [`to_table`] renders the switch points of several traces as a text table.
//!
//! Labels and styles are presentation metadata only, so they live in [`Trace`]
//! rather than in [`BooleanTimeSeries`] itself.
//!
//! # Examples
//!
//! ```
//! use bde_rs::plot::{to_data_blocks, PlotConfig, Trace};
//! use bde_rs::series::BooleanTimeSeries;
//!
//! let x = BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false], 2.0).unwrap();
//! let traces = [Trace::new(&x, "x").with_style("-r")];
//!
//! let data = to_data_blocks(&traces, &PlotConfig::default()).unwrap();
//! // Write to file and plot with: plot 'x.dat' index 0 with lines
//! ```

use std::fmt::Write as _;

use crate::series::BooleanTimeSeries;

/// Configuration options for step plot generation.
///
/// A `false` value is drawn at `offset` and a `true` value at `offset + scale`.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Height of a `true` value above `offset` (default: 1.0)
    pub scale: f64,
    /// Vertical position of a `false` value (default: 0.0)
    pub offset: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl PlotConfig {
    fn level(&self, value: bool) -> f64 {
        if value {
            self.offset + self.scale
        } else {
            self.offset
        }
    }
}

/// A series together with its presentation metadata.
#[derive(Debug, Clone)]
pub struct Trace<'a> {
    pub series: &'a BooleanTimeSeries,
    pub label: String,
    /// Free-form style hint for the plotting tool, e.g. `"-r"`.
    pub style: Option<String>,
}

impl<'a> Trace<'a> {
    pub fn new(series: &'a BooleanTimeSeries, label: impl Into<String>) -> Self {
        Self {
            series,
            label: label.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Vertices of the step plot of `series`.
///
/// Every constant segment contributes its two end points, so consecutive
/// segments are joined by vertical edges at the switch times.
pub fn step_points(series: &BooleanTimeSeries, config: &PlotConfig) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(2 * series.switch_count());
    for (from, to, value) in series.segments() {
        let y = config.level(value);
        points.push((from, y));
        points.push((to, y));
    }
    points
}

/// Renders the step plots of `traces` as whitespace-separated data blocks.
pub fn to_data_blocks(traces: &[Trace<'_>], config: &PlotConfig) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for (i, trace) in traces.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
            writeln!(out)?;
        }
        match &trace.style {
            Some(style) => writeln!(out, "# {} ({})", trace.label, style)?,
            None => writeln!(out, "# {}", trace.label)?,
        }
        for (x, y) in step_points(trace.series, config) {
            writeln!(out, "{} {}", x, y)?;
        }
    }
    Ok(out)
}

/// Renders the switch points of `traces` as a text table.
///
/// Rows are the union of all switch times. Each column shows the value of one
/// trace at that time, or `.` if the time lies beyond that trace's horizon.
///
/// ```
/// use bde_rs::plot::{to_table, Trace};
/// use bde_rs::series::BooleanTimeSeries;
///
/// let x = BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false], 2.0).unwrap();
/// let y = BooleanTimeSeries::new(vec![0.0, 1.5], &[false, true], 2.0).unwrap();
/// let table = to_table(&[Trace::new(&x, "x"), Trace::new(&y, "y")]).unwrap();
/// assert_eq!(table, "t\tx\ty\n0\t1\t0\n1\t0\t0\n1.5\t0\t1\n");
/// ```
pub fn to_table(traces: &[Trace<'_>]) -> Result<String, std::fmt::Error> {
    let mut times: Vec<f64> = traces
        .iter()
        .flat_map(|trace| trace.series.switch_times().iter().copied())
        .collect();
    times.sort_by(f64::total_cmp);
    times.dedup();

    let mut out = String::new();
    write!(out, "t")?;
    for trace in traces {
        write!(out, "\t{}", trace.label)?;
    }
    writeln!(out)?;

    for t in times {
        write!(out, "{}", t)?;
        for trace in traces {
            match trace.series.value_at(t) {
                Ok(value) => write!(out, "\t{}", if value { 1 } else { 0 })?,
                Err(_) => write!(out, "\t.")?,
            }
        }
        writeln!(out)?;
    }
    Ok(out)
}
