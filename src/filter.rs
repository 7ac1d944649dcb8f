//! Month and weekday filtering over a [`Dataset`].

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::dataset::{Dataset, TripRecord, weekday_from_name, weekday_name};

/// Months covered by the published data (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number, 1-indexed from the position in [`Month::ALL`].
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    pub fn from_name(name: &str) -> Option<Month> {
        Month::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.number() == n)
    }
}

/// Optional month and weekday restrictions. `None` means no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub month: Option<Month>,
    #[serde(serialize_with = "serialize_day")]
    pub day: Option<Weekday>,
}

impl FilterCriteria {
    pub fn new(month: Option<Month>, day: Option<Weekday>) -> Self {
        FilterCriteria { month, day }
    }

    /// No restriction on either dimension.
    pub fn all() -> Self {
        FilterCriteria::default()
    }

    /// Builds criteria from query names; `"all"` disables a dimension.
    ///
    /// Returns `None` for names outside the supported values.
    pub fn from_names(month: &str, day: &str) -> Option<Self> {
        let month = match month.trim() {
            m if m.eq_ignore_ascii_case("all") => None,
            m => Some(Month::from_name(m)?),
        };
        let day = match day.trim() {
            d if d.eq_ignore_ascii_case("all") => None,
            d => Some(weekday_from_name(d)?),
        };
        Some(FilterCriteria { month, day })
    }

    pub fn matches(&self, record: &TripRecord) -> bool {
        let month_ok = self.month.is_none_or(|m| record.month == m.number());
        let day_ok = self.day.is_none_or(|d| record.day_of_week == d);
        month_ok && day_ok
    }
}

fn serialize_day<S: serde::Serializer>(day: &Option<Weekday>, s: S) -> Result<S::Ok, S::Error> {
    match day {
        Some(d) => s.serialize_some(weekday_name(*d)),
        None => s.serialize_none(),
    }
}

/// Returns a new dataset holding only the records matching `criteria`,
/// in their original order. The input is left untouched.
#[tracing::instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    let records: Vec<TripRecord> = dataset
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();

    debug!(matched = records.len(), "Filter applied");
    Dataset::new(dataset.schema(), records)
}
