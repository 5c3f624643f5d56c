//! Command implementations for the waterflow CLI.
//!
//! Provides subcommands for fetching and processing SMHI waterflow data for
//! a single station, reprocessing a saved chart payload, and polling a list
//! of stations in one go.

use clap::{Args, Subcommand};
use std::{path::PathBuf, time::Duration};
use wf_smhi::client::Coordinates;
use wf_smhi::config::{ClientConfig, DEFAULT_BASE_URL};

pub mod batch;
pub mod cycle;
pub mod fetch;

/// Connection settings shared by the commands that talk to SMHI.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Root URL of the Vattenwebb hydrology API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ClientArgs {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.base_url.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch chart data for one station and write raw and processed JSON
    Fetch {
        /// SMHI subid of the river cross-section
        #[arg(short, long)]
        subid: u32,

        /// SWEREF 99 TM easting used for the point lookup
        #[arg(short, long, requires = "y", allow_negative_numbers = true)]
        x: Option<f64>,

        /// SWEREF 99 TM northing used for the point lookup
        #[arg(short, long, requires = "x", allow_negative_numbers = true)]
        y: Option<f64>,

        /// Directory for chart_data.json and processed_data.json
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Process a previously saved chart_data.json without touching the network
    Process {
        /// Path to a saved chart payload
        #[arg(short, long)]
        chart_json: PathBuf,

        /// Output path for the processed data
        #[arg(short, long, default_value = "processed_data.json")]
        output: PathBuf,
    },

    /// Run one independent cycle per station from a JSON station list
    Batch {
        /// Path to a JSON list of {"name", "subid", "x", "y"} stations
        #[arg(short = 't', long)]
        stations: PathBuf,

        /// Directory for one <name>.json per updated station
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Abandon a station's cycle after this many seconds
        #[arg(long, default_value_t = 300)]
        cycle_timeout_secs: u64,

        #[command(flatten)]
        client: ClientArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            subid,
            x,
            y,
            output_dir,
            client,
        } => {
            let coordinates = x.zip(y).map(|(x, y)| Coordinates { x, y });
            fetch::run_fetch(subid, coordinates, &output_dir, &client.config()).await
        }
        Command::Process { chart_json, output } => fetch::run_process(&chart_json, &output),
        Command::Batch {
            stations,
            output_dir,
            cycle_timeout_secs,
            client,
        } => {
            batch::run_batch(
                &stations,
                &output_dir,
                &client.config(),
                Duration::from_secs(cycle_timeout_secs),
            )
            .await
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_fetch_args() {
        let cli = Cli::try_parse_from([
            "wf-cli", "fetch", "--subid", "14054", "-x", "374751.9", "-y", "6795215.9",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch {
                subid, x, y, client, ..
            } => {
                assert_eq!(subid, 14054);
                assert_eq!(x, Some(374751.9));
                assert_eq!(y, Some(6795215.9));
                assert_eq!(client.config(), ClientConfig::default());
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_fetch_requires_both_coordinates() {
        let result = Cli::try_parse_from(["wf-cli", "fetch", "--subid", "14054", "-x", "1.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_args_config() {
        let cli = Cli::try_parse_from([
            "wf-cli",
            "batch",
            "--stations",
            "stations.json",
            "--base-url",
            "http://localhost:9000/hydronu",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Batch {
                client,
                cycle_timeout_secs,
                ..
            } => {
                let config = client.config();
                assert_eq!(config.base_url, "http://localhost:9000/hydronu/");
                assert_eq!(config.timeout, Duration::from_secs(5));
                assert_eq!(cycle_timeout_secs, 300);
            }
            _ => panic!("expected batch"),
        }
    }
}
