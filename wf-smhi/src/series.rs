use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wf_utils::dates::utc_from_millis;

/// A single `[timestamp_ms, value]` pair from a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "(i64, f64)")]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
}

impl SeriesPoint {
    /// Returns `None` when the timestamp is outside the calendar range.
    pub fn from_millis(millis: i64, value: f64) -> Option<SeriesPoint> {
        utc_from_millis(millis).map(|at| SeriesPoint { at, value })
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.at.timestamp_millis()
    }
}

impl TryFrom<(i64, f64)> for SeriesPoint {
    type Error = String;

    fn try_from((millis, value): (i64, f64)) -> Result<Self, Self::Error> {
        SeriesPoint::from_millis(millis, value)
            .ok_or_else(|| format!("timestamp {millis} is out of range"))
    }
}

/// One hindcast or forecast block of the chart payload: `{"data": [[ts, v], ...]}`.
///
/// Points keep the order the upstream sent them in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSeries {
    #[serde(default)]
    pub data: Vec<SeriesPoint>,
}

impl RawSeries {
    pub fn new(data: Vec<SeriesPoint>) -> RawSeries {
        RawSeries { data }
    }
}

/// Hindcast and forecast joined into one published series.
///
/// `startindex`, `firstdate` and `lastdate` are either all present or all
/// absent; they are absent only when `data` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedSeries {
    pub startindex: Option<usize>,
    pub firstdate: Option<NaiveDate>,
    pub lastdate: Option<NaiveDate>,
    pub data: Vec<f64>,
}

impl MergedSeries {
    /// The series published when neither source has any points.
    pub fn absent() -> MergedSeries {
        MergedSeries::default()
    }

    pub fn is_absent(&self) -> bool {
        self.startindex.is_none() && self.data.is_empty()
    }
}
