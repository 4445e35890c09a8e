//! AQI CLI - Command line tool for classifying air quality readings.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqi-cli",
    version,
    about = "Air Quality Index classification toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aqi_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("aqi-cli {}", env!("CARGO_PKG_VERSION"));
    aqi_cmd::run(cli.command)
}
