//! The published payload marks unsampled slots with `-1`. In memory they are
//! `None`; these helpers do the conversion at the serde boundary.

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Value written in place of a missing sample.
pub const MISSING: f64 = -1.0;

/// Turn a raw upstream value into a sample. `null` and the sentinel itself
/// both mean "no sample".
pub fn sample(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != MISSING)
}

pub fn or_missing(value: Option<f64>) -> f64 {
    value.unwrap_or(MISSING)
}

struct Slots<'a>(&'a [Option<f64>]);

impl Serialize for Slots<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|slot| or_missing(*slot)))
    }
}

pub fn serialize_slots<S: Serializer>(
    slots: &[Option<f64>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Slots(slots).serialize(serializer)
}

pub fn serialize_history<S: Serializer>(
    history: &BTreeMap<i32, Vec<Option<f64>>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(history.iter().map(|(year, slots)| (year, Slots(slots))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_drops_sentinel_and_null() {
        assert_eq!(sample(Some(-1.0)), None);
        assert_eq!(sample(None), None);
        assert_eq!(sample(Some(0.0)), Some(0.0));
        assert_eq!(sample(Some(-0.5)), Some(-0.5));
    }

    #[test]
    fn test_serialize_slots() {
        let mut serializer = serde_json::Serializer::new(Vec::new());
        serialize_slots(&[Some(1.5), None, Some(0.0)], &mut serializer).unwrap();
        let text = String::from_utf8(serializer.into_inner()).unwrap();
        assert_eq!(text, "[1.5,-1.0,0.0]");
    }
}
