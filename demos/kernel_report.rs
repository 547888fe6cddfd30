//! End-to-end demo: merge the profiling sources, fit the model, print the
//! report.
//!
//! Expects the profiling layout of the original measurement campaign in the
//! working directory:
//!
//! ```text
//! kernel_config/results/Addrelu/   (config documents, searched recursively)
//! kernel_latency/addrelu_latency.json
//! kernel_power/addrelu_power.json
//! kernel_energy/addrelu_energy.json
//! ```
//!
//! Run with `RUST_LOG=warn` (or finer) to see skipped entries and sources.

use predecir::pipeline::{run, SourcePaths};
use predecir::report;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let paths = SourcePaths {
        config_dir: PathBuf::from("kernel_config/results/Addrelu"),
        latency: PathBuf::from("kernel_latency/addrelu_latency.json"),
        power: PathBuf::from("kernel_power/addrelu_power.json"),
        energy: PathBuf::from("kernel_energy/addrelu_energy.json"),
    };

    match run(&paths) {
        Ok(summary) => {
            print!("{}", report::record_table(&summary.store));
            print!("{}", report::run_summary(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
