//! Most frequent month, weekday and hour of travel.

use chrono::Weekday;

use crate::analyzers::types::{Counted, MonthValue, Stat, TimeStats};
use crate::analyzers::utility::Tally;
use crate::dataset::{Dataset, weekday_name};
use crate::filter::Month;

/// Month and hour ties go to the smallest number; weekday ties go to the
/// weekday seen first in the dataset.
pub fn time_stats(dataset: &Dataset) -> Stat<TimeStats> {
    let months: Tally<u32> = dataset.iter().map(|r| r.month).collect();
    let days: Tally<Weekday> = dataset.iter().map(|r| r.day_of_week).collect();
    let hours: Tally<u32> = dataset.iter().map(|r| r.hour).collect();

    let (Some(month), Some(day), Some(hour)) = (
        months.mode_smallest(),
        days.mode_first_seen(),
        hours.mode_smallest(),
    ) else {
        return Stat::NoData;
    };

    Stat::Ready(TimeStats {
        month: Counted {
            value: MonthValue {
                number: month.0,
                name: Month::from_number(month.0),
            },
            count: month.1,
        },
        day_of_week: Counted {
            value: weekday_name(day.0).to_string(),
            count: day.1,
        },
        hour: hour.into(),
    })
}
