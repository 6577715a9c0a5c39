//! Result types for the stats operation, serialized as returned to callers.

use serde::Serialize;

/// Last cleaned row in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestReading {
    pub aqi: f64,
    pub city: String,
    /// `dd Mon yyyy`, e.g. `01 Jul 2020`.
    pub date: String,
}

/// Mean AQI over every cleaned row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalAverage {
    pub aqi: f64,
    /// `"{first_year}-{last_year}"`.
    pub period: String,
}

/// Lowest AQI ever recorded, first occurrence on ties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestRecorded {
    pub aqi: f64,
    pub city: String,
    /// `Mon yyyy`, e.g. `Jul 2020`.
    pub date: String,
}

/// Change in mean AQI between the first and last year, as a percentage of
/// the first year. Positive means air quality improved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    /// `None` when the first year's mean is zero.
    pub percentage: Option<f64>,
    pub from_year: i32,
    pub to_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub city: String,
    pub avg_aqi: f64,
    pub min_aqi: f64,
    pub max_aqi: f64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResult {
    pub latest: LatestReading,
    pub historical_avg: HistoricalAverage,
    pub best_recorded: BestRecorded,
    pub improvement: Improvement,
    /// One entry per city, in order of first appearance.
    pub city_stats: Vec<CityStats>,
    pub total_records: usize,
}
