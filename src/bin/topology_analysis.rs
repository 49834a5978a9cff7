//! Multiscale connectivity table for a point cloud file.
//!
//! ## Usage
//!
//! ```text
//! topology_analysis <points.txt> [nsteps] [mineps maxeps]
//! topology_analysis --config <config.json> <points.txt>
//! ```
//!
//! Prints one row per threshold (ε, C, D, I and optionally the k-distance
//! density) followed by the fitted exponents as `#` comment lines.

use std::env;
use std::io::{self, Write};
use std::path::Path;

use log::info;
use tda_multiscale::io::{read_point_cloud, write_matrix};
use tda_multiscale::{analyze_file, load_config, ScalingAnalyzer, ScalingResult};

const DEFAULT_STEPS: usize = 20;

const USAGE: &str = "Usage: topology_analysis <points.txt> [nsteps] [mineps maxeps]
       topology_analysis --config <config.json> <points.txt>";

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let result = analyze(&args)?;

    info!(
        "{} points, {} thresholds, {} admissible",
        result.n_points,
        result.rows.len(),
        result.admissible_rows
    );
    print_result(&result).map_err(|e| e.to_string())
}

fn analyze(args: &[String]) -> Result<ScalingResult, String> {
    let outcome = match args {
        [flag, cfg, input] if flag == "--config" => from_config(Path::new(cfg), Path::new(input)),
        [input] => analyze_file(Path::new(input), None, None, DEFAULT_STEPS),
        [input, steps] => {
            let n_steps = parse_arg(steps, "nsteps")?;
            analyze_file(Path::new(input), None, None, n_steps)
        }
        [input, steps, min, max] => {
            let n_steps = parse_arg(steps, "nsteps")?;
            let min = parse_arg(min, "mineps")?;
            let max = parse_arg(max, "maxeps")?;
            analyze_file(Path::new(input), Some(min), Some(max), n_steps)
        }
        _ => return Err(usage()),
    };
    outcome.map_err(|e| e.to_string())
}

fn from_config(config: &Path, input: &Path) -> tda_multiscale::Result<ScalingResult> {
    let config = load_config(config)?;
    let cloud = read_point_cloud(input, &config.input)?;
    ScalingAnalyzer::new(config).analyze(&cloud)
}

fn print_result(result: &ScalingResult) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_matrix(&mut out, &result.to_matrix())?;

    let gamma = fmt_exponent(result.gamma);
    let delta = fmt_exponent(result.delta);
    writeln!(out, "# gamma = {gamma}")?;
    writeln!(out, "# delta = {delta}")?;
    if result.rows.iter().any(|r| r.knn_density.is_some()) {
        let knn = fmt_exponent(result.knn_exponent);
        writeln!(out, "# knn_exponent = {knn}")?;
    }
    Ok(())
}

fn fmt_exponent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "nan".to_string(),
    }
}

fn parse_arg<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String> {
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) => Err(format!("Invalid {name}: {raw}\n{}", usage())),
    }
}

fn usage() -> String {
    USAGE.to_string()
}
