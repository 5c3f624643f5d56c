//! Data processing for SMHI chart payloads.
//!
//! This crate turns a raw chart payload into the published shape: merged
//! hindcast/forecast series for water flow and precipitation, plus
//! day-of-year statistics over the historical background. Everything here
//! is pure; fetching lives in `wf-smhi`.

pub mod history;
pub mod merge;

use chrono::{Local, TimeZone};
use serde_json::Value;
use wf_smhi::{
    chart::{ChartData, ProcessedData},
    sentinel::or_missing,
};

pub use history::process_background;
pub use merge::{merge_series, merge_series_in};

/// Process a chart payload, rendering series dates in the local time zone.
pub fn process_chart(chart: &ChartData) -> ProcessedData {
    process_chart_in(&Local, chart)
}

/// Process a chart payload, rendering series dates in `tz`.
pub fn process_chart_in<Tz: TimeZone>(tz: &Tz, chart: &ChartData) -> ProcessedData {
    ProcessedData {
        waterflow: merge_series_in(tz, &chart.cout_hindcast, &chart.cout_forecast),
        precipitation: merge_series_in(tz, &chart.psim_hindcast, &chart.psim_forecast),
        waterflow_history: process_background(&chart.background),
        mq: or_missing(chart.mq),
        mlq: or_missing(chart.mlq),
        mhq: or_missing(chart.mhq),
    }
}

/// Decode a raw chart payload and process it.
pub fn process_value(chart_data: &Value) -> wf_smhi::Result<ProcessedData> {
    let chart = ChartData::from_value(chart_data)?;
    Ok(process_chart(&chart))
}
