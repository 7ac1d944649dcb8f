//! Normalized trip records and the datasets built from them.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// A single normalized trip. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// 0-based position of the row in the source file.
    pub source_row: usize,
    pub start_time: NaiveDateTime,
    pub trip_duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub day_of_week: Weekday,
    pub hour: u32,
}

impl TripRecord {
    /// Builds a record, deriving month, weekday and hour from `start_time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_row: usize,
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: String,
        end_station: String,
        user_type: String,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        TripRecord {
            source_row,
            start_time,
            trip_duration_seconds,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    /// Full English name of the derived weekday, e.g. `"Monday"`.
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Which optional columns exist in the source file.
///
/// Presence is decided once per file from its header row, never per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn full() -> Self {
        Schema {
            has_gender: true,
            has_birth_year: true,
        }
    }

    pub fn minimal() -> Self {
        Schema::default()
    }
}

/// An ordered, read-only collection of trips sharing one [`Schema`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Dataset { schema, records }
    }

    pub fn empty(schema: Schema) -> Self {
        Dataset::new(schema, Vec::new())
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total of all trip durations, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.records.iter().map(|r| r.trip_duration_seconds).sum()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Looks a weekday up by its full name, ignoring case.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(name.trim()))
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}
