//! Sample the three-map planar Cantor set and print it as a point file.
//!
//! ```text
//! cantor_set <npoints> [seed]
//! ```

use std::env;
use std::io;

use log::info;
use tda_multiscale::io::write_matrix;
use tda_multiscale::{CantorSet, PointGenerator};

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
    let raw_n = args.next().ok_or_else(usage)?;
    let n: usize = raw_n.parse().map_err(|_| usage())?;
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().map_err(|_| usage())?,
        None => 0,
    };

    let generator = CantorSet::default();
    let cloud = generator.generate(n, seed).map_err(|e| e.to_string())?;
    let name = generator.name();
    info!("{name}: {} points, seed {seed}", cloud.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let table = cloud.as_array();
    write_matrix(&mut out, table).map_err(|e| e.to_string())
}

fn usage() -> String {
    "Usage: cantor_set <npoints> [seed]".to_string()
}
