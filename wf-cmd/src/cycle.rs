//! One fetch-then-process cycle for a station.

use anyhow::Context;
use serde_json::Value;
use wf_smhi::{
    chart::ProcessedData,
    client::{Coordinates, SmhiClient, Transport},
};

/// Result of a successful cycle: the raw chart payload and what gets published.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub production_time: String,
    pub chart_data: Value,
    pub processed: ProcessedData,
}

/// Fetch point and chart data for a station and process the chart.
///
/// Either both steps succeed or the error is returned and nothing is
/// produced for this cycle.
pub async fn run_cycle<T: Transport>(
    client: &SmhiClient<T>,
    subid: u32,
    coordinates: Option<Coordinates>,
) -> anyhow::Result<Cycle> {
    let fetched = client
        .fetch_data(subid, coordinates)
        .await
        .with_context(|| format!("Failed to fetch data for subid {subid}"))?;
    let processed = wf_data::process_value(&fetched.chart_data)
        .with_context(|| format!("Failed to process chart data for subid {subid}"))?;
    Ok(Cycle {
        production_time: fetched.production_time,
        chart_data: fetched.chart_data,
        processed,
    })
}
