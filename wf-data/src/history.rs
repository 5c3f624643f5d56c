use log::debug;
use wf_smhi::{
    background::{history_years, BackgroundEntry, HistoricalStats},
    sentinel::sample,
};
use wf_utils::dates::{day_slot, DAYS_PER_YEAR};

/// Fold the multi-year `background` samples into per-day statistics.
///
/// Each entry supplies the day of year through its own UTC date and one
/// value per historical year, newest first: `values[i]` is stored under the
/// `i`-th year of [`history_years`] whatever year the entry itself is dated.
/// Feb 29 entries are dropped and later leap-year days shift back one slot,
/// so every year keeps exactly [`DAYS_PER_YEAR`] slots. When two entries map
/// to the same day the later one wins.
pub fn process_background(entries: &[BackgroundEntry]) -> HistoricalStats {
    let years: Vec<i32> = history_years().collect();
    let mut stats = HistoricalStats::empty();

    for entry in entries {
        let date = entry.at.date_naive();
        let Some(slot) = day_slot(&date) else {
            debug!("Skipping background entry for {date}");
            continue;
        };
        for (idx, year) in years.iter().enumerate() {
            let value = entry.values.get(idx).copied().flatten();
            if let Some(slots) = stats.history.get_mut(year) {
                slots[slot] = sample(value);
            }
        }
    }

    for day in 0..DAYS_PER_YEAR {
        let samples: Vec<f64> = years
            .iter()
            .filter_map(|year| stats.history.get(year).and_then(|slots| slots[day]))
            .collect();
        if samples.is_empty() {
            continue;
        }
        stats.average[day] = Some(samples.iter().sum::<f64>() / samples.len() as f64);
        stats.min[day] = samples.iter().copied().reduce(f64::min);
        stats.max[day] = samples.iter().copied().reduce(f64::max);
    }

    stats
}
