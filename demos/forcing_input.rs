use clap::Parser;

use bde_rs::history::DelayedValues;
use bde_rs::plot::{to_table, Trace};
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::BdeSolver;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Delay between the forcing input and the response.
    #[arg(long, value_name = "FLOAT", default_value = "0.3")]
    delay: f64,

    /// Period of the forcing square wave.
    #[arg(long, value_name = "FLOAT", default_value = "1")]
    period: f64,

    /// Simulation end time.
    #[arg(long, value_name = "FLOAT", default_value = "3")]
    end_time: f64,
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

    // x2(t) = x1(t - tau), where x1 is a square wave switching every half period.
    let model = |_: &DelayedValues, forced: &DelayedValues| {
        let (tau, x1) = (0, 0);
        vec![forced[tau][x1]]
    };

    let half = args.period / 2.0;
    let n = (args.end_time / half).ceil() as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * half).collect();
    let x1_input = BooleanTimeSeries::alternating(times, false, args.end_time)?;
    let x2_history = BooleanTimeSeries::new(vec![0.0], &[true], args.delay)?;

    let solver = BdeSolver::new(model, vec![args.delay], vec![x2_history])
        .with_forcing_inputs(vec![x1_input.clone()]);
    let output = solver.solve(args.end_time)?;

    print!(
        "{}",
        to_table(&[Trace::new(&x1_input, "x1"), Trace::new(&output[0], "x2")])?
    );

    Ok(())
}
