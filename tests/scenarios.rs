use test_log::test;

use bde_rs::error::BdeError;
use bde_rs::history::DelayedValues;
use bde_rs::model::Unforced;
use bde_rs::series::BooleanTimeSeries;
use bde_rs::solver::{BdeSolver, SolverConfig};
use bde_rs::threshold::relative_threshold;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "actual = {:?}, expected = {:?}",
        actual,
        expected
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "actual = {:?}, expected = {:?}", actual, expected);
    }
}

fn light_input(end_time: f64) -> BooleanTimeSeries {
    let times: Vec<f64> = std::iter::once(0.0)
        .chain((6..120).step_by(12).map(|h| h as f64))
        .collect();
    let values: Vec<bool> = times.iter().map(|&h| (6.0..18.0).contains(&(h % 24.0))).collect();
    BooleanTimeSeries::new(times, &values, end_time).unwrap()
}

fn neurospora(z: &DelayedValues, forced: &DelayedValues) -> Vec<bool> {
    let (m, ft) = (0, 1);
    let light = 0;
    let (tau1, tau2, tau3) = (0, 1, 2);
    vec![!z[tau2][ft] || forced[tau3][light], z[tau1][m]]
}

#[test]
fn test_neurospora_regression() {
    let hist_m = BooleanTimeSeries::new(vec![0.0, 5.0, 12.0], &[true, false, true], 24.0).unwrap();
    let hist_ft = BooleanTimeSeries::new(vec![0.0, 8.0, 16.0], &[false, true, false], 24.0).unwrap();

    let solver = BdeSolver::new(neurospora, vec![5.0752, 6.0211, 14.5586], vec![hist_m, hist_ft])
        .with_forcing_inputs(vec![light_input(118.0)]);
    let output = solver.solve(118.0).unwrap();

    let (m, ft) = (&output[0], &output[1]);
    assert_close(
        m.switch_times(),
        &[
            0.0, 5.0, 12.0, 32.5586, 43.6549, 56.5586, 67.6549, 80.5586, 91.6549, 104.5586, 115.6549,
        ],
    );
    assert_eq!(
        m.values(),
        &[true, false, true, false, true, false, true, false, true, false, true]
    );
    assert_close(
        ft.switch_times(),
        &[
            0.0, 8.0, 16.0, 24.0, 37.6338, 48.7301, 61.6338, 72.7301, 85.6338, 96.7301, 109.6338,
        ],
    );
    assert_eq!(
        ft.values(),
        &[false, true, false, true, false, true, false, true, false, true, false]
    );
    assert_eq!(m.horizon(), 118.0);
    assert_eq!(ft.horizon(), 118.0);
}

#[test]
fn test_threshold_cut_simulate_compare() {
    // Samples of a 24h oscillation, thresholded into a boolean series.
    let times: Vec<f64> = (0..=96).map(|i| i as f64).collect();
    let levels: Vec<f64> = times
        .iter()
        .map(|t| 1.0 + (2.0 * std::f64::consts::PI * (t + 0.5) / 24.0).sin())
        .collect();
    let data = relative_threshold(&times, &levels, 0.5).unwrap();
    assert_eq!(data.horizon(), 96.0);
    assert_eq!(&data.switch_times()[..4], &[0.0, 12.0, 24.0, 36.0]);
    assert_eq!(&data.values()[..4], &[true, false, true, false]);

    // A pure 24h delay reproduces a periodic signal from its first period.
    let history = data.cut(0.0, 24.0).unwrap();
    assert_eq!(history.horizon(), 24.0);
    let solver = BdeSolver::new(Unforced(|z: &DelayedValues| vec![z[0][0]]), vec![24.0], vec![history]);
    let output = solver.solve(96.0).unwrap();

    assert_eq!(output[0].horizon(), 96.0);
    assert_eq!(
        output[0].switch_times(),
        &[0.0, 12.0, 24.0, 36.0, 48.0, 60.0, 72.0, 84.0]
    );
    assert_eq!(data.hamming_distance(&output[0]), Ok(0.0));

    // Shifting the history by a quarter period costs half of every period after the history.
    let shifted = BdeSolver::new(
        Unforced(|z: &DelayedValues| vec![z[0][0]]),
        vec![24.0],
        vec![data.cut(6.0, 30.0).unwrap().cut(0.0, 24.0).unwrap()],
    )
    .solve(96.0)
    .unwrap();
    let d1 = data.cut(24.0, 96.0).unwrap().hamming_distance(&shifted[0].cut(24.0, 96.0).unwrap()).unwrap();
    let d2 = shifted[0].cut(24.0, 96.0).unwrap().hamming_distance(&data.cut(24.0, 96.0).unwrap()).unwrap();
    assert_eq!(d1, d2);
    assert!((d1 - 36.0).abs() < 1e-9);
}

#[test]
fn test_outputs_cover_end_time() {
    let model = Unforced(|z: &DelayedValues| vec![z[1][1] && !z[0][0], z[0][0] || !z[2][1], !z[1][2]]);
    let histories = vec![
        BooleanTimeSeries::new(vec![0.0, 0.5], &[true, false], 1.5).unwrap(),
        BooleanTimeSeries::new(vec![0.0, 1.0], &[false, true], 1.5).unwrap(),
        BooleanTimeSeries::constant(true, 1.5).unwrap(),
    ];
    let solver = BdeSolver::new(model, vec![0.5, 1.0, 1.5], histories);

    for end_time in [2.0, 7.25, 20.0] {
        let output = solver.solve(end_time).unwrap();
        assert_eq!(output.len(), 3);
        for x in &output {
            assert_eq!(x.horizon(), end_time);
            assert!(x.switch_times().windows(2).all(|w| w[0] < w[1]));
            assert!(x.switch_times().iter().all(|&t| t < end_time));
            // Every instant of the simulated range has a well-defined value.
            assert!(x.value_at(end_time).is_ok());
        }
    }
}

#[test]
fn test_cyclic_dependency_is_reported() {
    // x1 = x2 and x2 = NOT x1 with zero delay never settle.
    let model = Unforced(|z: &DelayedValues| vec![z[0][1], !z[0][0]]);
    let histories = vec![
        BooleanTimeSeries::constant(true, 1.0).unwrap(),
        BooleanTimeSeries::constant(true, 1.0).unwrap(),
    ];
    let solver = BdeSolver::new(model, vec![0.0, 1.0], histories)
        .with_config(SolverConfig::default().with_max_evaluations_per_instant(16));

    match solver.solve(3.0) {
        Err(BdeError::CyclicDependency { time, evaluations }) => {
            assert_eq!(time, 1.0);
            assert_eq!(evaluations, 16);
        }
        other => panic!("expected a cyclic dependency, got {:?}", other),
    }
}
