use crate::{
    background::{BackgroundEntry, HistoricalStats},
    error::{Result, SmhiError},
    series::{MergedSeries, RawSeries},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the forecast run token in the point response.
pub const PRODUCTION_TIME_KEY: &str = "productionTime";

/// The parts of a `data/chart` response the processor reads.
///
/// Absent series are empty and absent statistics are `None`; a present key
/// with the wrong shape is a [`SmhiError::MalformedResponse`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default)]
    pub cout_hindcast: RawSeries,
    #[serde(default)]
    pub cout_forecast: RawSeries,
    #[serde(default)]
    pub psim_hindcast: RawSeries,
    #[serde(default)]
    pub psim_forecast: RawSeries,
    #[serde(default)]
    pub background: Vec<BackgroundEntry>,
    /// Mean discharge
    #[serde(default)]
    pub mq: Option<f64>,
    /// Mean low discharge
    #[serde(default)]
    pub mlq: Option<f64>,
    /// Mean high discharge
    #[serde(default)]
    pub mhq: Option<f64>,
}

impl ChartData {
    pub fn from_value(value: &Value) -> Result<ChartData> {
        Ok(ChartData::deserialize(value)?)
    }
}

/// Everything published for one station after a fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedData {
    pub waterflow: MergedSeries,
    pub precipitation: MergedSeries,
    pub waterflow_history: HistoricalStats,
    pub mq: f64,
    pub mlq: f64,
    pub mhq: f64,
}

/// Pull the forecast run token out of a `data/point` response.
///
/// Strings are used as-is; numbers are rendered in decimal. Missing, null,
/// empty and zero tokens are all rejected.
pub fn production_time(point: &Value) -> Result<String> {
    match point.get(PRODUCTION_TIME_KEY) {
        Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
        Some(Value::Number(token)) if token.as_f64() != Some(0.0) => Ok(token.to_string()),
        _ => Err(SmhiError::MissingField(PRODUCTION_TIME_KEY)),
    }
}
