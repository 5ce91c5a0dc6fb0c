//! CVD CLI - COVID-19 data analysis and dashboard rendering.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cvd-cli",
    version,
    about = "COVID-19 data analysis and interactive dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cvd_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting cvd-cli");
    cvd_cmd::run(cli.command)
}
