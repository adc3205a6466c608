pub mod chart;
pub mod dataset;
pub mod error;
pub mod list_stations;
pub mod parse;
pub mod render;
pub mod station;
pub mod time;

pub use dataset::{Data, Dataset, DatasetCache};
pub use error::DataSourceError;
pub use station::{DayRecord, Location, Measure, Station};
