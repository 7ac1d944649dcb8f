//! Property-based tests for filtering, paging and duration breakdowns.

use bikeshare_explorer::analyzers::duration::{mean_breakdown, total_breakdown};
use bikeshare_explorer::dataset::WEEKDAYS;
use bikeshare_explorer::{Dataset, FilterCriteria, Month, Pager, Schema, TripRecord, filter};
use chrono::NaiveDate;
use proptest::prelude::*;

/// Trips spread over the first half of 2017 at random hours.
fn arbitrary_trip() -> impl Strategy<Value = (u32, u32, u32, String)> {
    (0u32..181, 0u32..24, 0u32..7200, 0usize..4)
        .prop_map(|(day, hour, secs, station)| (day, hour, secs, format!("Station {station}")))
}

fn arbitrary_dataset(max: usize) -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arbitrary_trip(), 0..max).prop_map(|rows| {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, (day, hour, secs, station))| {
                let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
                    + chrono::Days::new(day as u64);
                TripRecord::new(
                    i,
                    start.and_hms_opt(hour, 0, 0).unwrap(),
                    secs as f64,
                    station.clone(),
                    station,
                    "Subscriber".to_string(),
                    None,
                    None,
                )
            })
            .collect();
        Dataset::new(Schema::minimal(), records)
    })
}

fn arbitrary_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::select(Month::ALL.to_vec())),
        prop::option::of(prop::sample::select(WEEKDAYS.to_vec())),
    )
        .prop_map(|(month, day)| FilterCriteria::new(month, day))
}

proptest! {
    /// Filtering yields an order-preserving subsequence of matching records.
    #[test]
    fn filter_is_ordered_subsequence(
        ds in arbitrary_dataset(60),
        criteria in arbitrary_criteria(),
    ) {
        let out = filter(&ds, &criteria);
        prop_assert!(out.iter().all(|r| criteria.matches(r)));

        let rows: Vec<usize> = out.iter().map(|r| r.source_row).collect();
        prop_assert!(rows.windows(2).all(|w| w[0] < w[1]));

        let expected = ds.iter().filter(|r| criteria.matches(r)).count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn filter_is_idempotent(ds in arbitrary_dataset(60), criteria in arbitrary_criteria()) {
        let once = filter(&ds, &criteria);
        let twice = filter(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_filter_keeps_total_duration(ds in arbitrary_dataset(60)) {
        let out = filter(&ds, &FilterCriteria::all());
        prop_assert_eq!(out.total_duration(), ds.total_duration());
    }

    /// Concatenated pages reproduce the dataset exactly.
    #[test]
    fn pages_reassemble_dataset(ds in arbitrary_dataset(40)) {
        let mut pager = Pager::new(&ds);
        let mut seen = Vec::new();
        while !pager.is_exhausted() {
            let page = pager.next_page();
            prop_assert!(page.len() <= 5);
            seen.extend(page.records.iter().cloned());
        }
        prop_assert_eq!(seen.as_slice(), ds.records());
        prop_assert!(pager.next_page().is_empty());
    }

    #[test]
    fn total_breakdown_round_trips(secs in 0u64..10_000_000) {
        prop_assert_eq!(total_breakdown(secs as f64).to_seconds(), secs);
    }

    #[test]
    fn mean_breakdown_round_trips(secs in 0u64..1_000_000) {
        prop_assert_eq!(mean_breakdown(secs as f64).to_seconds(), secs);
    }
}

#[test]
fn pages_for_boundary_sizes() {
    for n in [0usize, 1, 5, 6, 11] {
        let records = (0..n)
            .map(|i| {
                TripRecord::new(
                    i,
                    NaiveDate::from_ymd_opt(2017, 2, 1)
                        .unwrap()
                        .and_hms_opt(8, 0, 0)
                        .unwrap(),
                    60.0,
                    "A".into(),
                    "B".into(),
                    "Customer".into(),
                    None,
                    None,
                )
            })
            .collect();
        let ds = Dataset::new(Schema::minimal(), records);

        let pages: Vec<_> = Pager::new(&ds).collect();
        let expected_pages = n.div_ceil(5);
        assert_eq!(pages.len(), expected_pages, "size {n}");

        let rows: Vec<usize> = pages
            .iter()
            .flat_map(|p| p.records.iter().map(|r| r.source_row))
            .collect();
        assert_eq!(rows, (0..n).collect::<Vec<_>>(), "size {n}");
    }
}

#[test]
fn total_breakdown_day_boundary() {
    for secs in [86_399u64, 86_400, 86_401, 89_999, 90_000] {
        assert_eq!(total_breakdown(secs as f64).to_seconds(), secs);
    }
}
