use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use netclust::{dataset, stats};

/// Device capture directories, summarized in order.
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
#[command(version, about = "Descriptive statistics for per-device traffic captures", long_about = None)]
struct Args {
    /// Root directory holding one sub-directory per device
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Device to summarize (repeatable); defaults to the full capture list
    #[arg(long)]
    device: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let devices: Vec<String> = if args.device.is_empty() {
        DEVICES.iter().map(|device| device.to_string()).collect()
    } else {
        args.device.clone()
    };

    for device in &devices {
        let dir = args.data_dir.join(device);
        let table = dataset::assemble(&dir)
            .with_context(|| format!("loading captures for {}", device))?;
        let summaries = stats::summarize(&table);
        println!("{}", device);
        print!("{}", stats::render_summaries(&summaries));
        println!();
    }

    Ok(())
}
