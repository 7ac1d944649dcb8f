//! Most popular start station, end station and trip.

use crate::analyzers::types::{Stat, StationStats};
use crate::analyzers::utility::Tally;
use crate::dataset::Dataset;

/// Counts stations and `"<start><separator><end>"` trips. Ties go to the
/// value seen first. `"A to B"` and `"B to A"` are separate trips.
pub fn station_stats(dataset: &Dataset, separator: &str) -> Stat<StationStats> {
    let starts: Tally<&str> = dataset.iter().map(|r| r.start_station.as_str()).collect();
    let ends: Tally<&str> = dataset.iter().map(|r| r.end_station.as_str()).collect();
    let trips: Tally<String> = dataset
        .iter()
        .map(|r| format!("{}{}{}", r.start_station, separator, r.end_station))
        .collect();

    let (Some(start), Some(end), Some(trip)) = (
        starts.mode_first_seen(),
        ends.mode_first_seen(),
        trips.mode_first_seen(),
    ) else {
        return Stat::NoData;
    };

    Stat::Ready(StationStats {
        start_station: (start.0.to_string(), start.1).into(),
        end_station: (end.0.to_string(), end.1).into(),
        trip: trip.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Counted;
    use crate::dataset::Schema;
    use crate::dataset::test_support::{at, trip};

    fn ds(pairs: &[(&str, &str)]) -> Dataset {
        let records = pairs
            .iter()
            .enumerate()
            .map(|(i, (from, to))| trip(i, at(2017, 1, 2, 8), 60.0, from, to))
            .collect();
        Dataset::new(Schema::minimal(), records)
    }

    #[test]
    fn test_station_stats_empty() {
        assert!(station_stats(&ds(&[]), " to ").is_no_data());
    }

    #[test]
    fn test_station_stats_modes() {
        let stats = station_stats(
            &ds(&[("A", "B"), ("B", "A"), ("A", "C"), ("A", "B"), ("C", "B")]),
            " to ",
        )
        .ready()
        .unwrap();
        assert_eq!(stats.start_station, Counted::new("A".to_string(), 3));
        assert_eq!(stats.end_station, Counted::new("B".to_string(), 3));
        assert_eq!(stats.trip, Counted::new("A to B".to_string(), 2));
    }

    #[test]
    fn test_reversed_trips_are_distinct() {
        let trips = ds(&[("B", "A"), ("A", "B"), ("A", "B"), ("B", "A"), ("B", "A")]);
        let stats = station_stats(&trips, " to ").ready().unwrap();
        assert_eq!(stats.trip.value, "B to A");
        assert_eq!(stats.trip.count, 3);
    }

    #[test]
    fn test_custom_separator() {
        let stats = station_stats(&ds(&[("X", "Y")]), " -> ").ready().unwrap();
        assert_eq!(stats.trip.value, "X -> Y");
    }
}
