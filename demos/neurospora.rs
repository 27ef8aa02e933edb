//! Fits a two-gene circadian clock model to (synthetic) expression data.
//!
//! The pipeline mirrors what one does with real measurements: threshold the data into
//! boolean time series, use the first day as the history, simulate the rest under a
//! light/dark forcing input and compare the simulation against the thresholded data.

use clap::Parser;
use log::info;

use bde_rs::history::DelayedValues;
use bde_rs::plot::{to_table, Trace};
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::BdeSolver;
use bde_rs::threshold::relative_threshold;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Length of the experiment (hours).
    #[arg(long, value_name = "FLOAT", default_value = "118")]
    end_time: f64,

    /// Length of the history used to start the simulation (hours).
    #[arg(long, value_name = "FLOAT", default_value = "24")]
    history: f64,

    /// Relative threshold used to booleanize the expression levels.
    #[arg(long, value_name = "FLOAT", default_value = "0.3")]
    threshold: f64,

    /// Delays tau1, tau2, tau3 (hours).
    #[arg(long, num_args = 3, value_name = "FLOAT", default_values_t = [5.0752, 6.0211, 14.5586])]
    delays: Vec<f64>,
}

/// Hourly samples of a smooth 24h oscillation, standing in for measured expression levels.
fn synthetic_samples(end_time: f64, phase: f64, amplitude: f64) -> (Vec<f64>, Vec<f64>) {
    let n = end_time.floor() as usize;
    let times: Vec<f64> = (0..=n).map(|i| i as f64).collect();
    let values = times
        .iter()
        .map(|t| amplitude * (1.0 + (2.0 * std::f64::consts::PI * (t - phase) / 24.0).cos()))
        .collect();
    (times, values)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // Turn the experiment data into boolean time series.
    let (t, m_levels) = synthetic_samples(args.end_time, 4.0, 150.0);
    let (_, ft_levels) = synthetic_samples(args.end_time, 10.0, 300.0);
    let m_bts = relative_threshold(&t, &m_levels, args.threshold)?;
    let ft_bts = relative_threshold(&t, &ft_levels, args.threshold)?;
    let end_time = m_bts.horizon();

    // The first day is the history.
    let hist_m = m_bts.cut(0.0, args.history)?;
    let hist_ft = ft_bts.cut(0.0, args.history)?;

    // Light is on between 6h and 18h of every day.
    let light_t: Vec<f64> = std::iter::once(0.0)
        .chain((6..120).step_by(12).map(|h| h as f64))
        .filter(|&h| h <= end_time)
        .collect();
    let light_y: Vec<bool> = light_t.iter().map(|&h| (6.0..18.0).contains(&(h % 24.0))).collect();
    let light = BooleanTimeSeries::new(light_t, &light_y, end_time)?;

    let eqns = |z: &DelayedValues, forced: &DelayedValues| {
        let (m, ft) = (0, 1);
        let light = 0;
        let (tau1, tau2, tau3) = (0, 1, 2);
        vec![!z[tau2][ft] || forced[tau3][light], z[tau1][m]]
    };

    let solver = BdeSolver::new(eqns, args.delays.clone(), vec![hist_m, hist_ft])
        .with_forcing_inputs(vec![light.clone()]);
    let output = solver.solve(end_time)?;
    let (m_output, ft_output) = (&output[0], &output[1]);

    print!(
        "{}",
        to_table(&[
            Trace::new(m_output, "m"),
            Trace::new(ft_output, "ft"),
            Trace::new(&light, "light"),
        ])?
    );

    let simulated = end_time - args.history;
    for (name, data, sim) in [("m", &m_bts, m_output), ("ft", &ft_bts, ft_output)] {
        let distance = data.hamming_distance(sim)?;
        info!("Hamming distance of {}: {:.4}", name, distance);
        println!(
            "Hamming of {} as %age of simulated time: {:.2}%",
            name,
            100.0 * distance / simulated
        );
    }

    Ok(())
}
