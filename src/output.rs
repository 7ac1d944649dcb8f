//! Output formatting for aggregated statistics and raw pages.
//!
//! Supports human-readable report lines, JSON serialization, and CSV
//! rendering of paged records.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::{
    Breakdown, DurationStats, Report, Stat, StationStats, TimeStats, UserStats,
};
use crate::dataset::TripRecord;
use crate::pager::Page;

const NO_DATA: &str = "No trips match the selected filters.";

/// Upper-cases the first letter of each word: `"new york"` → `"New York"`.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn time_lines(stats: &Stat<TimeStats>) -> Vec<String> {
    let Some(t) = stats.as_ready() else {
        return vec![NO_DATA.to_string()];
    };
    let month = match t.month.value.name {
        Some(m) => title_case(m.name()),
        None => format!("month {}", t.month.value.number),
    };
    vec![
        format!("The most common month is {month}."),
        format!("The most common day of the week is {}.", t.day_of_week.value),
        format!("The most common hour of the day is at {}.", t.hour.value),
    ]
}

pub fn station_lines(stats: &Stat<StationStats>) -> Vec<String> {
    let Some(s) = stats.as_ready() else {
        return vec![NO_DATA.to_string()];
    };
    vec![
        format!("The most commonly used start station is at {}.", s.start_station.value),
        format!("The most commonly used end station is at {}.", s.end_station.value),
        format!("The most commonly used trip combination is {}.", s.trip.value),
    ]
}

pub fn describe_breakdown(b: &Breakdown) -> String {
    match *b {
        Breakdown::MinutesSeconds { minutes, seconds } => {
            format!("{minutes} minutes and {seconds} seconds")
        }
        Breakdown::HoursMinutesSeconds {
            hours,
            minutes,
            seconds,
        } => format!("{hours} hours, {minutes} minutes and {seconds} seconds"),
        Breakdown::DaysHoursMinutesSeconds {
            days,
            hours,
            minutes,
            seconds,
        } => format!("{days} days, {hours} hours, {minutes} minutes and {seconds} seconds"),
    }
}

pub fn duration_lines(stats: &Stat<DurationStats>) -> Vec<String> {
    let Some(d) = stats.as_ready() else {
        return vec![NO_DATA.to_string()];
    };
    vec![
        format!("The total travel time is {}.", describe_breakdown(&d.total)),
        format!("The mean travel time is {}.", describe_breakdown(&d.mean)),
    ]
}

pub fn user_lines(stats: &UserStats, city: &str) -> Vec<String> {
    let city = title_case(city);
    let mut lines = Vec::new();

    if stats.user_types.is_empty() {
        lines.push(NO_DATA.to_string());
    } else {
        lines.push(format!("There are {} types of users", stats.user_types.len()));
        for u in &stats.user_types {
            lines.push(format!("The {} is {} with {}.", u.ordinal, u.user_type, u.count));
        }
    }

    match &stats.genders {
        Stat::Ready(genders) => {
            for g in genders {
                lines.push(format!("There are {} {}s.", g.count, g.value.to_lowercase()));
            }
        }
        Stat::NoData => lines.push("No gender data for the selected trips.".to_string()),
        Stat::ColumnUnavailable => {
            lines.push(format!("Sorry, gender is not available for {city}."))
        }
    }

    match &stats.birth_years {
        Stat::Ready(y) => {
            lines.push(format!("The earliest birth year is {}.", y.earliest));
            lines.push(format!("The most recent birth year is {}.", y.most_recent));
            lines.push(format!("The most common birth year is {}.", y.most_common));
        }
        Stat::NoData => lines.push("No birth year data for the selected trips.".to_string()),
        Stat::ColumnUnavailable => {
            lines.push(format!("Sorry, birth year is not available for {city}."))
        }
    }

    lines
}

/// All report sections, each with a heading.
pub fn report_sections(report: &Report, city: &str) -> Vec<(&'static str, Vec<String>)> {
    vec![
        ("The Most Frequent Times of Travel", time_lines(&report.time)),
        ("The Most Popular Stations and Trip", station_lines(&report.stations)),
        ("Trip Duration", duration_lines(&report.duration)),
        ("User Stats", user_lines(&report.users, city)),
    ]
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes `records` as CSV rows with a header.
pub fn write_records<W: Write>(writer: W, records: &[TripRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders a page as a caption followed by its records in CSV form.
pub fn render_page(page: &Page<'_>, total: usize) -> Result<String> {
    debug!(first_row = page.first_row, last_row = page.last_row, "Rendering page");
    if page.is_empty() {
        let message = if page.is_whole {
            "There are no entries in this table to show."
        } else {
            "You have reached the end of the table!"
        };
        return Ok(message.to_string());
    }

    let mut out = if page.is_whole {
        format!("There are only {total} entries in this table, showing all of them to you!\n")
    } else {
        format!(
            "You are currently viewing data from row {} to {}.\n",
            page.first_row, page.last_row
        )
    };

    let mut buf = Vec::new();
    write_records(&mut buf, page.records)?;
    out.push_str(&String::from_utf8(buf)?);

    if page.is_last && !page.is_whole {
        out.push_str("You have reached the end of the table!");
    }
    Ok(out)
}
