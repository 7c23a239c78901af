//! Golden self-join profiles for inputs whose matrix profile has a closed
//! form. Data files live in `tests/golden_data/`.

use std::fs;

use serde::Deserialize;

use matprof::algorithms::stomp::selfjoin;
use matprof::{AbsoluteEuclidean, MatrixProfileConfig, ZNormalizedEuclidean};

#[derive(Deserialize)]
struct GoldenData {
    ts: Vec<f64>,
    m: usize,
    normalize: bool,
    profile: Vec<f64>,
    epsilon: f64,
}

fn load_golden(filename: &str) -> GoldenData {
    let path = format!("tests/golden_data/{filename}");
    let data = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("golden data file not found: {path}"));
    serde_json::from_str(&data).unwrap()
}

fn run_golden(filename: &str) {
    let golden = load_golden(filename);
    let config = MatrixProfileConfig::new(golden.m);
    let mut p = vec![0.0; golden.ts.len() - golden.m + 1];
    if golden.normalize {
        selfjoin::<ZNormalizedEuclidean>(&golden.ts, &config, &mut p).unwrap();
    } else {
        selfjoin::<AbsoluteEuclidean>(&golden.ts, &config, &mut p).unwrap();
    }

    assert_eq!(p.len(), golden.profile.len(), "{filename}: length mismatch");
    for (i, (got, want)) in p.iter().zip(&golden.profile).enumerate() {
        assert!(
            (got - want).abs() < golden.epsilon,
            "{filename}: mismatch at {i}: got {got}, expected {want}"
        );
    }
}

#[test]
fn test_raw_ramp() {
    run_golden("raw_ramp.json");
}

#[test]
fn test_znorm_constant() {
    run_golden("znorm_constant.json");
}

#[test]
fn test_znorm_ramp() {
    run_golden("znorm_ramp.json");
}
