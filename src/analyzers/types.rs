//! Result records produced by the aggregator.

use serde::Serialize;

use crate::filter::Month;

/// Outcome of a statistic that may be undefined for the data at hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Stat<T> {
    Ready(T),
    /// The (filtered) dataset has no values to compute over.
    NoData,
    /// The column does not exist in this city's data.
    ColumnUnavailable,
}

impl<T> Stat<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Stat::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Stat::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Stat::NoData)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Stat::ColumnUnavailable)
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Stat::NoData, Stat::Ready)
    }
}

/// A value with the number of trips it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Counted<T> {
    pub fn new(value: T, count: usize) -> Self {
        Counted { value, count }
    }
}

impl<T> From<(T, usize)> for Counted<T> {
    fn from((value, count): (T, usize)) -> Self {
        Counted { value, count }
    }
}

/// A calendar month. `name` is only set for January through June.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthValue {
    pub number: u32,
    pub name: Option<Month>,
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Counted<MonthValue>,
    pub day_of_week: Counted<String>,
    pub hour: Counted<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Counted<String>,
    pub end_station: Counted<String>,
    /// `"<start> to <end>"`, treated as one compound key.
    pub trip: Counted<String>,
}

/// A duration split by repeated floor division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum Breakdown {
    MinutesSeconds {
        minutes: u64,
        seconds: u64,
    },
    HoursMinutesSeconds {
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
    DaysHoursMinutesSeconds {
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: u64,
    },
}

impl Breakdown {
    /// Whole seconds represented by this breakdown.
    pub fn to_seconds(&self) -> u64 {
        match *self {
            Breakdown::MinutesSeconds { minutes, seconds } => minutes * 60 + seconds,
            Breakdown::HoursMinutesSeconds {
                hours,
                minutes,
                seconds,
            } => (hours * 60 + minutes) * 60 + seconds,
            Breakdown::DaysHoursMinutesSeconds {
                days,
                hours,
                minutes,
                seconds,
            } => ((days * 24 + hours) * 60 + minutes) * 60 + seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub total: Breakdown,
    pub mean_seconds: f64,
    pub mean: Breakdown,
}

/// A user type with its rank among all types present (0 = most common).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedUserType {
    pub rank: usize,
    pub ordinal: String,
    pub user_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<RankedUserType>,
    pub genders: Stat<Vec<Counted<String>>>,
    pub birth_years: Stat<BirthYearStats>,
}

/// All four statistic groups for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub trips: usize,
    pub time: Stat<TimeStats>,
    pub stations: Stat<StationStats>,
    pub duration: Stat<DurationStats>,
    pub users: UserStats,
}
