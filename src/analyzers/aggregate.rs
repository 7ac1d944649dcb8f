use tracing::debug;

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{DurationStats, Report, Stat, StationStats, TimeStats, UserStats};
use crate::analyzers::users::user_stats;
use crate::config::LabelConfig;
use crate::dataset::Dataset;

/// Computes statistic groups using its own label configuration.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    labels: LabelConfig,
}

impl Aggregator {
    pub fn new(labels: LabelConfig) -> Self {
        Aggregator { labels }
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    #[tracing::instrument(skip_all, fields(rows = dataset.len()))]
    pub fn time_stats(&self, dataset: &Dataset) -> Stat<TimeStats> {
        time_stats(dataset)
    }

    #[tracing::instrument(skip_all, fields(rows = dataset.len()))]
    pub fn station_stats(&self, dataset: &Dataset) -> Stat<StationStats> {
        station_stats(dataset, &self.labels.trip_separator)
    }

    #[tracing::instrument(skip_all, fields(rows = dataset.len()))]
    pub fn duration_stats(&self, dataset: &Dataset) -> Stat<DurationStats> {
        duration_stats(dataset)
    }

    #[tracing::instrument(skip_all, fields(rows = dataset.len()))]
    pub fn user_stats(&self, dataset: &Dataset) -> UserStats {
        user_stats(dataset, &self.labels)
    }

    /// Runs all four groups.
    pub fn report(&self, dataset: &Dataset) -> Report {
        if dataset.is_empty() {
            debug!("Aggregating an empty dataset");
        }
        Report {
            trips: dataset.len(),
            time: self.time_stats(dataset),
            stations: self.station_stats(dataset),
            duration: self.duration_stats(dataset),
            users: self.user_stats(dataset),
        }
    }
}
