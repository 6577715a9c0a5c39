//! Descriptive statistics over the measurement history.
//!
//! [`aggregate`] cleans the raw rows and derives the scalar and per-city
//! summaries returned by the stats operation.

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::aggregate;
pub use types::{BestRecorded, CityStats, HistoricalAverage, Improvement, LatestReading, StatsResult};

use crate::dataset::load_measurements;
use crate::error::StatsError;

/// Reads the dataset at `path` afresh and aggregates it. Nothing is cached,
/// so every call reflects the current file contents.
#[tracing::instrument]
pub fn stats_from_path(path: &str) -> Result<StatsResult, StatsError> {
    let dataset = load_measurements(path).map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "Dataset load failed");
        StatsError::Load(e)
    })?;
    aggregate(&dataset)
}
