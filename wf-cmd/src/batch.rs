//! Poll several stations at once.
//!
//! Every station gets its own cycle; cycles share the HTTP client but no
//! state. A station whose cycle fails or times out is logged and skipped,
//! and its previous output is left untouched.

use crate::{
    cycle::{run_cycle, Cycle},
    fetch::write_json,
};
use anyhow::{anyhow, bail, Context};
use futures::future::join_all;
use log::{info, warn};
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path, time::Duration};
use wf_smhi::{
    client::{Coordinates, SmhiClient, Transport},
    config::ClientConfig,
};

/// A monitored river cross-section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    pub name: String,
    pub subid: u32,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl Station {
    /// Coordinates are only used when both are set.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.x.zip(self.y).map(|(x, y)| Coordinates { x, y })
    }

    /// Output file stem: the name with anything but letters, digits, `-`
    /// and `_` replaced by `_`.
    pub fn file_stem(&self) -> String {
        self.name
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// Parse and validate a JSON station list.
///
/// Names must be non-empty and unique, and subids positive.
pub fn parse_stations(json: &str) -> anyhow::Result<Vec<Station>> {
    let stations: Vec<Station> = serde_json::from_str(json).context("Invalid station list")?;
    let mut seen = HashSet::new();
    for station in &stations {
        if station.name.trim().is_empty() {
            bail!("Station with subid {} has no name", station.subid);
        }
        if station.subid == 0 {
            bail!("Station {} needs a positive subid", station.name);
        }
        if !seen.insert(station.file_stem()) {
            bail!("Station name {} is used more than once", station.name);
        }
    }
    Ok(stations)
}

pub fn load_stations(path: &Path) -> anyhow::Result<Vec<Station>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_stations(&text)
}

/// Run one cycle for a station, abandoning it after `limit`.
pub async fn run_station<T: Transport>(
    client: &SmhiClient<T>,
    station: &Station,
    limit: Duration,
) -> anyhow::Result<Cycle> {
    tokio::time::timeout(limit, run_cycle(client, station.subid, station.coordinates()))
        .await
        .map_err(|_| anyhow!("Cycle for {} timed out after {:?}", station.name, limit))?
}

/// Run every station's cycle concurrently; outcomes come back in input order.
pub async fn run_cycles<'a, T: Transport>(
    client: &SmhiClient<T>,
    stations: &'a [Station],
    limit: Duration,
) -> Vec<(&'a Station, anyhow::Result<Cycle>)> {
    join_all(
        stations
            .iter()
            .map(|station| async move { (station, run_station(client, station, limit).await) }),
    )
    .await
}

pub async fn run_batch(
    stations_path: &Path,
    output_dir: &Path,
    config: &ClientConfig,
    limit: Duration,
) -> anyhow::Result<()> {
    let stations = load_stations(stations_path)?;
    let client = SmhiClient::with_config(config.clone());
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    info!("Polling {} stations", stations.len());
    let mut updated = 0;
    for (station, outcome) in run_cycles(&client, &stations, limit).await {
        match outcome {
            Ok(cycle) => {
                let path = output_dir.join(format!("{}.json", station.file_stem()));
                write_json(&path, &cycle.processed)?;
                info!(
                    "Updated {} (production time {})",
                    station.name, cycle.production_time
                );
                updated += 1;
            }
            Err(e) => warn!("Skipping update for {}: {e:#}", station.name),
        }
    }

    info!(
        "Batch complete. {updated}/{} stations updated in {}",
        stations.len(),
        output_dir.display()
    );
    Ok(())
}
