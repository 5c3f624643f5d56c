//! wf-cli - Command line tool for SMHI river waterflow data.

use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "wf-cli",
    version,
    about = "SMHI river waterflow forecast and history toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wf_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    let cli = Cli::parse();
    wf_cmd::run(cli.command).await
}
