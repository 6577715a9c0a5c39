//! Immutable lookup tables consulted by the predict operation.
//!
//! Both tables are loaded once at start-up and shared read-only between
//! requests.

pub mod cities;
pub mod history;
pub mod resolver;

pub use cities::CityMapping;
pub use history::{HistoricalAverages, HistoricalFeatureTable};
pub use resolver::{LookupTables, Resolved};
