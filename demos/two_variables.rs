use bde_rs::history::DelayedValues;
use bde_rs::model::Unforced;
use bde_rs::plot::{to_data_blocks, to_table, PlotConfig, Trace};
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::BdeSolver;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let (x1, x2) = (0, 1);
    let (tau1, tau2) = (0, 1);
    let model = Unforced(move |z: &DelayedValues| vec![z[tau1][x2], !z[tau2][x1]]);

    let x1_history = BooleanTimeSeries::new(vec![0.0, 1.5], &[true, false], 2.0)?;
    let x2_history = BooleanTimeSeries::new(vec![0.0, 1.0], &[true, false], 2.0)?;

    let solver = BdeSolver::new(model, vec![1.0, 0.5], vec![x1_history, x2_history]);
    let output = solver.solve(6.0)?;

    let traces = [
        Trace::new(&output[0], "x1").with_style("-r"),
        Trace::new(&output[1], "x2").with_style("-b"),
    ];
    print!("{}", to_table(&traces)?);
    println!();

    // Stack the two traces so they do not overlap when plotted together.
    for (i, trace) in traces.iter().enumerate() {
        let config = PlotConfig {
            scale: 0.8,
            offset: 1.5 * i as f64,
        };
        print!("{}", to_data_blocks(std::slice::from_ref(trace), &config)?);
        println!();
        println!();
    }

    Ok(())
}
