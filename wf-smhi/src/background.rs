use crate::sentinel::{serialize_history, serialize_slots};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wf_utils::dates::{utc_from_millis, DAYS_PER_YEAR};

/// Newest year of the historical axis.
pub const NEWEST_HISTORY_YEAR: i32 = 2022;

/// Oldest year of the historical axis.
pub const OLDEST_HISTORY_YEAR: i32 = 1991;

/// Years of the historical axis, newest first. Position `i` here is the
/// position of that year's value in every [`BackgroundEntry::values`].
pub fn history_years() -> impl Iterator<Item = i32> {
    (OLDEST_HISTORY_YEAR..=NEWEST_HISTORY_YEAR).rev()
}

/// One calendar day of the `background` payload: `[timestamp_ms, [v2022, v2021, ...]]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "(i64, Vec<Option<f64>>)")]
pub struct BackgroundEntry {
    pub at: DateTime<Utc>,
    pub values: Vec<Option<f64>>,
}

impl BackgroundEntry {
    pub fn from_millis(millis: i64, values: Vec<Option<f64>>) -> Option<BackgroundEntry> {
        utc_from_millis(millis).map(|at| BackgroundEntry { at, values })
    }
}

impl TryFrom<(i64, Vec<Option<f64>>)> for BackgroundEntry {
    type Error = String;

    fn try_from((millis, values): (i64, Vec<Option<f64>>)) -> Result<Self, Self::Error> {
        BackgroundEntry::from_millis(millis, values)
            .ok_or_else(|| format!("timestamp {millis} is out of range"))
    }
}

/// Per day-of-year statistics over the historical axis.
///
/// Every slot vector has [`DAYS_PER_YEAR`] entries. `None` marks a day with
/// no sample and is published as `-1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalStats {
    #[serde(serialize_with = "serialize_history")]
    pub history: BTreeMap<i32, Vec<Option<f64>>>,
    #[serde(serialize_with = "serialize_slots")]
    pub average: Vec<Option<f64>>,
    #[serde(serialize_with = "serialize_slots")]
    pub min: Vec<Option<f64>>,
    #[serde(serialize_with = "serialize_slots")]
    pub max: Vec<Option<f64>>,
}

impl HistoricalStats {
    /// Stats with every year present and every slot unsampled.
    pub fn empty() -> HistoricalStats {
        HistoricalStats {
            history: history_years()
                .map(|year| (year, vec![None; DAYS_PER_YEAR]))
                .collect(),
            average: vec![None; DAYS_PER_YEAR],
            min: vec![None; DAYS_PER_YEAR],
            max: vec![None; DAYS_PER_YEAR],
        }
    }
}
