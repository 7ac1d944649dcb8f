//! Rider demographics: user types, gender and birth year.

use crate::analyzers::types::{BirthYearStats, Counted, RankedUserType, Stat, UserStats};
use crate::analyzers::utility::Tally;
use crate::config::LabelConfig;
use crate::dataset::Dataset;

/// User types ranked by descending count, ties in first-seen order. Blank
/// cells are not counted.
pub fn user_types(dataset: &Dataset, labels: &LabelConfig) -> Vec<RankedUserType> {
    let tally: Tally<&str> = dataset
        .iter()
        .map(|r| r.user_type.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();
    tally
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(rank, (user_type, count))| RankedUserType {
            rank,
            ordinal: labels.ordinal(rank),
            user_type: user_type.to_string(),
            count,
        })
        .collect()
}

/// Trips per gender, most common first. Empty cells are not counted.
pub fn gender_counts(dataset: &Dataset) -> Stat<Vec<Counted<String>>> {
    if !dataset.schema().has_gender {
        return Stat::ColumnUnavailable;
    }

    let tally: Tally<&str> = dataset.iter().filter_map(|r| r.gender.as_deref()).collect();
    if tally.is_empty() {
        return Stat::NoData;
    }

    Stat::Ready(
        tally
            .ranked()
            .into_iter()
            .map(|(gender, count)| Counted {
                value: gender.to_string(),
                count,
            })
            .collect(),
    )
}

/// Earliest, most recent and most common birth year. The mode tie goes to
/// the earliest year.
pub fn birth_year_stats(dataset: &Dataset) -> Stat<BirthYearStats> {
    if !dataset.schema().has_birth_year {
        return Stat::ColumnUnavailable;
    }

    let years: Vec<i32> = dataset.iter().filter_map(|r| r.birth_year).collect();
    let (Some(earliest), Some(most_recent)) = (years.iter().min(), years.iter().max()) else {
        return Stat::NoData;
    };
    let tally: Tally<i32> = years.iter().copied().collect();
    let Some((most_common, _)) = tally.mode_smallest() else {
        return Stat::NoData;
    };

    Stat::Ready(BirthYearStats {
        earliest: *earliest,
        most_recent: *most_recent,
        most_common,
    })
}

pub fn user_stats(dataset: &Dataset, labels: &LabelConfig) -> UserStats {
    UserStats {
        user_types: user_types(dataset, labels),
        genders: gender_counts(dataset),
        birth_years: birth_year_stats(dataset),
    }
}
