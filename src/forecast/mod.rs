//! Forecast aggregation
//!
//! Turns the provider's flat 3-hour time series into day summaries and the near-term hourly slice.
//! Everything here is a pure function of its input.

pub mod format;
pub mod models;

use chrono::FixedOffset;
use crate::forecast::format::{format_date_key, format_day_label};
use crate::forecast::models::{DailySummary, RawSample};

/// Number of samples shown in the hourly strip, 24 hours at a 3-hour cadence
pub const HOURLY_COUNT: usize = 8;

/// Samples collected for one calendar day, in input order
struct DayGroup<'a> {
    date_key: String,
    weekday_label: String,
    samples: Vec<&'a RawSample>,
}

impl DayGroup<'_> {
    fn summarize(&self) -> DailySummary {
        let sum: f64 = self.samples.iter().map(|s| s.temperature).sum();
        let mean = sum / self.samples.len() as f64;

        DailySummary {
            date_key: self.date_key.clone(),
            weekday_label: self.weekday_label.clone(),
            temperature_celsius: mean.round() as i64,
            mean_celsius: mean,
            icon_code: mode(self.samples.iter().map(|s| s.condition_icon.as_str())),
            description: mode(self.samples.iter().map(|s| s.condition_text.as_str())),
            sample_count: self.samples.len(),
        }
    }
}

/// Groups samples by calendar day and reduces each day to a summary
///
/// Groups are emitted in the order their first sample was met, never sorted. Input is not
/// reordered, so out of order samples only affect which group comes first.
///
/// # Arguments
///
/// * 'samples' - chronologically ordered samples
/// * 'zone' - display zone that decides where a day begins
pub fn group_by_day(samples: &[RawSample], zone: &FixedOffset) -> Vec<DailySummary> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for sample in samples {
        let date_key = format_date_key(sample.timestamp, zone);

        match groups.iter_mut().find(|g| g.date_key == date_key) {
            Some(group) => group.samples.push(sample),
            None => groups.push(DayGroup {
                date_key,
                weekday_label: format_day_label(sample.timestamp, zone),
                samples: vec![sample],
            }),
        }
    }

    groups.iter().map(DayGroup::summarize).collect()
}

/// Returns the first `count` samples unchanged, or all of them if there are fewer
///
/// # Arguments
///
/// * 'samples' - chronologically ordered samples
/// * 'count' - number of samples to keep
pub fn take_hourly(samples: &[RawSample], count: usize) -> Vec<RawSample> {
    samples.iter().take(count).cloned().collect()
}

/// Most frequent value; on a tie the value seen first wins.
/// An empty input gives an empty string, which can't happen for a day group.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        // strictly greater keeps the earliest candidate on ties
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }

    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}
