//! Total and mean trip duration, broken down for display.

use crate::analyzers::types::{Breakdown, DurationStats, Stat};
use crate::analyzers::utility::mean;
use crate::dataset::Dataset;

// Days are only split out once hours exceed 24, and hours once minutes
// exceed 60. Exactly 24 hours stays as "24 hours".
const DAY_SPLIT_ABOVE_HOURS: u64 = 24;
const HOUR_SPLIT_ABOVE_MINUTES: u64 = 60;

fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    }
}

/// Breaks a total into hours, minutes and seconds, adding days when the
/// hour count is greater than 24.
pub fn total_breakdown(secs: f64) -> Breakdown {
    let total = whole_seconds(secs);
    let (minutes, seconds) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > DAY_SPLIT_ABOVE_HOURS {
        Breakdown::DaysHoursMinutesSeconds {
            days: hours / 24,
            hours: hours % 24,
            minutes,
            seconds,
        }
    } else {
        Breakdown::HoursMinutesSeconds {
            hours,
            minutes,
            seconds,
        }
    }
}

/// Breaks a mean into minutes and seconds, adding hours when the minute
/// count is greater than 60.
pub fn mean_breakdown(secs: f64) -> Breakdown {
    let total = whole_seconds(secs);
    let (minutes, seconds) = (total / 60, total % 60);

    if minutes > HOUR_SPLIT_ABOVE_MINUTES {
        Breakdown::HoursMinutesSeconds {
            hours: minutes / 60,
            minutes: minutes % 60,
            seconds,
        }
    } else {
        Breakdown::MinutesSeconds { minutes, seconds }
    }
}

/// Returns [`Stat::NoData`] for an empty dataset, where the mean is undefined.
pub fn duration_stats(dataset: &Dataset) -> Stat<DurationStats> {
    let durations: Vec<f64> = dataset.iter().map(|r| r.trip_duration_seconds).collect();
    let Some(mean_seconds) = mean(&durations) else {
        return Stat::NoData;
    };
    let total_seconds: f64 = durations.iter().sum();

    Stat::Ready(DurationStats {
        total_seconds,
        total: total_breakdown(total_seconds),
        mean_seconds,
        mean: mean_breakdown(mean_seconds),
    })
}
