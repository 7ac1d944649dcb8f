pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod output;
pub mod pager;
pub mod parser;

pub use analyzers::Aggregator;
pub use dataset::{Dataset, Schema, TripRecord};
pub use error::{Result, TripError};
pub use filter::{FilterCriteria, Month, filter};
pub use pager::{PAGE_SIZE, Page, Pager, PagerState};
pub use parser::{LoadSummary, RowPolicy, load_file, read_trips};
