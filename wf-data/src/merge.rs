use chrono::{Local, TimeZone};
use wf_smhi::series::{MergedSeries, RawSeries};
use wf_utils::dates::start_index;

/// Join hindcast and forecast into one series, dates in the local time zone.
pub fn merge_series(hindcast: &RawSeries, forecast: &RawSeries) -> MergedSeries {
    merge_series_in(&Local, hindcast, forecast)
}

/// Join hindcast and forecast into one series.
///
/// Values keep source order (hindcast first, then forecast) and are not
/// sorted by timestamp. `startindex` is the UTC day of year of the earliest
/// point; `firstdate` and `lastdate` are the earliest and latest points as
/// calendar dates in `tz`.
pub fn merge_series_in<Tz: TimeZone>(
    tz: &Tz,
    hindcast: &RawSeries,
    forecast: &RawSeries,
) -> MergedSeries {
    let points = || hindcast.data.iter().chain(forecast.data.iter());
    let (Some(first), Some(last)) = (
        points().map(|point| point.at).min(),
        points().map(|point| point.at).max(),
    ) else {
        return MergedSeries::absent();
    };

    MergedSeries {
        startindex: Some(start_index(&first.date_naive())),
        firstdate: Some(first.with_timezone(tz).date_naive()),
        lastdate: Some(last.with_timezone(tz).date_naive()),
        data: points().map(|point| point.value).collect(),
    }
}
