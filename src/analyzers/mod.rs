//! Trip statistics.
//!
//! Four independent groups are computed over a (possibly filtered)
//! dataset: time of travel, station popularity, trip duration and user
//! demographics. Each tolerates empty datasets and missing optional
//! columns by reporting [`types::Stat::NoData`] or
//! [`types::Stat::ColumnUnavailable`] instead of failing.

pub mod aggregate;
pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;

pub use aggregate::Aggregator;
