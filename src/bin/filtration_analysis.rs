//! Per-dimension persistence summary of a point cloud file.
//!
//! ```text
//! filtration_analysis <points.txt> [relevance_threshold] [step]
//! ```
//!
//! Builds the Vietoris-Rips filtration up to the cloud diameter, resolved in
//! steps of 0.001 unless another step is given, and reports, for H0..H2, the
//! number of features with their longest and mean lifetime.

use std::env;
use std::path::Path;

use tda_multiscale::io::read_point_cloud;
use tda_multiscale::{FiltrationSummary, InputConfig, RipsPersistence};

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or_else(usage)?;

    let mut summary = FiltrationSummary::default();
    if let Some(raw) = args.next() {
        let threshold = parse_arg(&raw, "threshold")?;
        summary = summary.with_relevance_threshold(threshold);
    }
    if let Some(raw) = args.next() {
        let step = parse_arg(&raw, "step")?;
        summary = summary.with_step(step);
    }

    let input = InputConfig::default();
    let cloud = read_point_cloud(Path::new(&path), &input);
    let cloud = cloud.map_err(|e| e.to_string())?;
    let result = summary.analyze(&cloud, &RipsPersistence);
    let result = result.map_err(|e| e.to_string())?;

    println!("{:>4} {:>8} {:>14} {:>14}", "dim", "count", "max", "avg");
    for dim in 0..result.max_dimension() {
        let count = result.counts[dim];
        let max = result.max_lifetime[dim];
        let avg = result.average_lifetime[dim];
        println!("{dim:>4} {count:>8} {max:>14.6} {avg:>14.6}");
    }
    if let Some(relevant) = &result.relevant_counts {
        println!("# relevant = {relevant:?}");
    }
    Ok(())
}

fn parse_arg(raw: &str, name: &str) -> Result<f64, String> {
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) => Err(format!("Invalid {name}: {raw}\n{}", usage())),
    }
}

fn usage() -> String {
    "Usage: filtration_analysis <points.txt> [relevance_threshold] [step]".to_string()
}
