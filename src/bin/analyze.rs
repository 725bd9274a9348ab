use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use netclust::DEFAULT_SEED;
use netclust::pipeline::{AnalysisOptions, run_device_analysis};

/// Device capture directories, analyzed in order.
const DEVICES: [&str; 9] = [
    "DanminiDoorbell",
    "EcobeeThermostat",
    "EnnioDoorbell",
    "PhilipsBabyMonitor",
    "ProvisionPT737ESecurityCamera",
    "ProvisionPT838SecurityCamera",
    "SamsungSNHWebcam",
    "SimpleHomeXCS71002WHTSecurityCamera",
    "SimpleHomeXCS71003WHTSecurityCamera",
];

#[derive(Debug, Parser)]
#[command(version, about = "Cluster per-device IoT traffic captures", long_about = None)]
struct Args {
    /// Root directory holding one sub-directory per device
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Device to analyze (repeatable); defaults to the full capture list
    #[arg(long)]
    device: Vec<String>,

    /// Fraction of variance the principal components must explain
    #[arg(long, default_value_t = 0.9)]
    variance_target: f64,

    /// Write the combined table as <device>.csv
    #[arg(long)]
    save_combined: bool,

    /// Write the reduced matrix as <device>_pca.csv
    #[arg(long)]
    save_reduced: bool,

    /// Seed for every randomized stage
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let devices: Vec<String> = if args.device.is_empty() {
        DEVICES.iter().map(|device| device.to_string()).collect()
    } else {
        args.device.clone()
    };

    let options = AnalysisOptions {
        variance_target: args.variance_target,
        save_combined: args.save_combined,
        save_reduced: args.save_reduced,
        seed: args.seed,
    };

    let mut failures = 0usize;
    for device in &devices {
        let dir = args.data_dir.join(device);
        match run_device_analysis(&dir, &options) {
            Ok(report) => info!(
                "{}: k={}, {} components, report written",
                device, report.best_k, report.n_components
            ),
            Err(err) => {
                // one device failing must not take the rest of the batch down
                error!("{}: {}", device, err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
