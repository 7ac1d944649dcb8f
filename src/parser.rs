//! CSV parser and record normalizer for bikeshare trip files.
//!
//! Accepts both the published headers (`Start Time`, `Trip Duration`, ...)
//! and their snake_case equivalents (`start_timestamp`, ...). Optional
//! columns are detected from the header row, once per file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dataset::{Dataset, Schema, TripRecord};
use crate::error::{Result, TripError};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// (published header, snake_case alias)
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("Start Time", "start_timestamp"),
    ("Trip Duration", "trip_duration_seconds"),
    ("Start Station", "start_station"),
    ("End Station", "end_station"),
    ("User Type", "user_type"),
];
const GENDER_COLUMN: (&str, &str) = ("Gender", "gender");
const BIRTH_YEAR_COLUMN: (&str, &str) = ("Birth Year", "birth_year");

/// One row as it appears in the source file, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time", alias = "start_timestamp")]
    pub start_timestamp: String,
    #[serde(rename = "Trip Duration", alias = "trip_duration_seconds")]
    pub trip_duration_seconds: String,
    #[serde(rename = "Start Station", alias = "start_station")]
    pub start_station: String,
    #[serde(rename = "End Station", alias = "end_station")]
    pub end_station: String,
    #[serde(rename = "User Type", alias = "user_type", default)]
    pub user_type: String,
    #[serde(rename = "Gender", alias = "gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", alias = "birth_year", default)]
    pub birth_year: Option<String>,
}

/// What to do with a row that fails to normalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Drop the row and count it in the [`LoadSummary`].
    #[default]
    Skip,
    /// Fail the whole load on the first bad row.
    Abort,
}

/// Row counts reported alongside a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub malformed_timestamp: usize,
    pub malformed_duration: usize,
    pub malformed_birth_year: usize,
    pub unreadable: usize,
}

impl LoadSummary {
    pub fn skipped(&self) -> usize {
        self.malformed_timestamp
            + self.malformed_duration
            + self.malformed_birth_year
            + self.unreadable
    }

    fn count(&mut self, err: &TripError) {
        match err {
            TripError::MalformedTimestamp { .. } => self.malformed_timestamp += 1,
            TripError::MalformedDuration { .. } => self.malformed_duration += 1,
            TripError::MalformedBirthYear { .. } => self.malformed_birth_year += 1,
            _ => self.unreadable += 1,
        }
    }
}

/// Parses a start timestamp in any of the accepted layouts.
pub fn parse_timestamp(row: usize, value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TripError::MalformedTimestamp {
            row,
            value: value.to_string(),
        })
}

fn parse_duration(row: usize, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(TripError::MalformedDuration {
            row,
            value: value.to_string(),
        }),
    }
}

// Birth years are often exported as floats ("1989.0").
fn parse_birth_year(row: usize, value: Option<&str>) -> Result<Option<i32>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(year) if year.fract() == 0.0 && (1.0..=9999.0).contains(&year) => Ok(Some(year as i32)),
        _ => Err(TripError::MalformedBirthYear {
            row,
            value: value.to_string(),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Turns a raw row into a [`TripRecord`].
///
/// Optional fields are forced to `None` when their column is absent from
/// `schema`, so every record in a dataset has the same shape.
///
/// # Errors
///
/// Returns [`TripError::MalformedTimestamp`] if the start time cannot be
/// parsed, or a duration/birth-year error for unparseable numbers.
pub fn normalize(row: usize, raw: RawTrip, schema: Schema) -> Result<TripRecord> {
    let start_time = parse_timestamp(row, &raw.start_timestamp)?;
    let duration = parse_duration(row, &raw.trip_duration_seconds)?;

    let gender = if schema.has_gender {
        non_empty(raw.gender)
    } else {
        None
    };
    let birth_year = if schema.has_birth_year {
        parse_birth_year(row, raw.birth_year.as_deref())?
    } else {
        None
    };

    Ok(TripRecord::new(
        row,
        start_time,
        duration,
        raw.start_station,
        raw.end_station,
        raw.user_type,
        gender,
        birth_year,
    ))
}

fn has_column(headers: &StringRecord, (name, alias): (&str, &str)) -> bool {
    headers.iter().any(|h| {
        let h = h.trim();
        h == name || h == alias
    })
}

/// Inspects a header row, returning the file's [`Schema`].
///
/// # Errors
///
/// Returns [`TripError::MissingColumn`] if a required column is absent.
pub fn detect_schema(headers: &StringRecord) -> Result<Schema> {
    if let Some((column, _)) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !has_column(headers, **col))
    {
        return Err(TripError::MissingColumn { column: *column });
    }

    Ok(Schema {
        has_gender: has_column(headers, GENDER_COLUMN),
        has_birth_year: has_column(headers, BIRTH_YEAR_COLUMN),
    })
}

/// Reads every trip from CSV `input`.
#[tracing::instrument(skip(input))]
pub fn read_trips<R: Read>(input: R, policy: RowPolicy) -> Result<(Dataset, LoadSummary)> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let schema = detect_schema(rdr.headers()?)?;
    debug!(?schema, "Detected schema");

    let mut summary = LoadSummary::default();
    let mut records = Vec::new();

    for (row, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let normalized = result
            .map_err(TripError::from)
            .and_then(|raw| normalize(row, raw, schema));

        match normalized {
            Ok(record) => records.push(record),
            Err(e) if policy == RowPolicy::Skip && e.is_row_error() => {
                warn!(row, error = %e, "Skipping malformed row");
                summary.count(&e);
            }
            Err(e) => return Err(e),
        }
    }

    summary.loaded = records.len();
    if summary.skipped() > 0 {
        warn!(
            skipped = summary.skipped(),
            loaded = summary.loaded,
            "Rows skipped during load"
        );
    }
    info!(loaded = summary.loaded, "Trip data loaded");

    Ok((Dataset::new(schema, records), summary))
}

/// Opens the CSV file at `path` and reads it with [`read_trips`].
pub fn load_file(path: impl AsRef<Path>, policy: RowPolicy) -> Result<(Dataset, LoadSummary)> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening trip file");
    let file = File::open(path)?;
    read_trips(file, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    #[test]
    fn test_parse_timestamp_formats() {
        let ts = parse_timestamp(0, "2017-06-23 15:09:32").unwrap();
        assert_eq!((ts.month(), ts.day(), ts.hour()), (6, 23, 15));
        assert!(parse_timestamp(0, "2017-06-23T15:09:32.250").is_ok());
        assert!(parse_timestamp(0, "06/23/2017 15:09").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp(7, "yesterday-ish").unwrap_err();
        assert!(matches!(err, TripError::MalformedTimestamp { row: 7, .. }));
    }

    #[test]
    fn test_read_full_schema() {
        let (ds, summary) = read_trips(CHICAGO.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(ds.schema(), Schema::full());
        assert_eq!(ds.len(), 3);
        assert_eq!(summary.loaded, 3);
        assert_eq!(summary.skipped(), 0);

        let first = &ds.records()[0];
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.day_of_week, Weekday::Fri);

        // present column, empty cell
        assert_eq!(ds.records()[1].birth_year, None);
        assert_eq!(ds.records()[2].gender, None);
    }

    #[test]
    fn test_read_without_optional_columns() {
        let (ds, _) = read_trips(WASHINGTON.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(ds.schema(), Schema::minimal());
        assert_eq!(ds.records()[0].trip_duration_seconds, 489.066);
        assert!(ds.iter().all(|r| r.gender.is_none() && r.birth_year.is_none()));
    }

    #[test]
    fn test_snake_case_headers() {
        let input = "\
start_timestamp,trip_duration_seconds,start_station,end_station,user_type,gender
2017-02-01 07:00:00,60,A,B,Customer,Female
";
        let (ds, _) = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert!(ds.schema().has_gender);
        assert!(!ds.schema().has_birth_year);
        assert_eq!(ds.records()[0].start_station, "A");
    }

    #[test]
    fn test_missing_required_column() {
        let input = "Start Time,Trip Duration,Start Station,User Type\n";
        let err = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap_err();
        assert!(matches!(err, TripError::MissingColumn { column: "End Station" }));
    }

    #[test]
    fn test_skip_policy_counts_bad_rows() {
        let input = "\
Start Time,Trip Duration,Start Station,End Station,User Type
not a time,60,A,B,Customer
2017-02-01 07:00:00,-5,A,B,Customer
2017-02-01 08:00:00,60,A,B,Customer
";
        let (ds, summary) = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].source_row, 2);
        assert_eq!(summary.malformed_timestamp, 1);
        assert_eq!(summary.malformed_duration, 1);
        assert_eq!(summary.skipped(), 2);
    }

    #[test]
    fn test_abort_policy_fails_on_first_bad_row() {
        let input = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-02-01 08:00:00,60,A,B,Customer
not a time,60,A,B,Customer
";
        let err = read_trips(input.as_bytes(), RowPolicy::Abort).unwrap_err();
        assert!(matches!(err, TripError::MalformedTimestamp { row: 1, .. }));
    }

    #[test]
    fn test_out_of_range_birth_year_is_malformed() {
        let input = "\
Start Time,Trip Duration,Start Station,End Station,User Type,Birth Year
2017-02-01 08:00:00,60,A,B,Customer,99999999999
2017-02-01 09:00:00,60,A,B,Customer,-1985
2017-02-01 10:00:00,60,A,B,Customer,1985.0
";
        let (ds, summary) = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(summary.malformed_birth_year, 2);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].birth_year, Some(1985));

        let err = read_trips(input.as_bytes(), RowPolicy::Abort).unwrap_err();
        assert!(matches!(err, TripError::MalformedBirthYear { row: 0, .. }));
    }

    #[test]
    fn test_blank_user_type_is_kept_on_record() {
        let input = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-02-01 08:00:00,60,A,B,
";
        let (ds, summary) = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert_eq!(summary.skipped(), 0);
        assert_eq!(ds.records()[0].user_type, "");
    }

    #[test]
    fn test_normalize_drops_fields_outside_schema() {
        let raw = RawTrip {
            start_timestamp: "2017-03-05 12:00:00".into(),
            trip_duration_seconds: "100".into(),
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: "Subscriber".into(),
            gender: Some("Male".into()),
            birth_year: Some("1980".into()),
        };
        let r = normalize(0, raw, Schema::minimal()).unwrap();
        assert_eq!(r.gender, None);
        assert_eq!(r.birth_year, None);
    }

    #[test]
    fn test_header_only_file() {
        let input = "Start Time,Trip Duration,Start Station,End Station,User Type,Gender\n";
        let (ds, summary) = read_trips(input.as_bytes(), RowPolicy::Skip).unwrap();
        assert!(ds.is_empty());
        assert!(ds.schema().has_gender);
        assert_eq!(summary, LoadSummary::default());
    }
}
