use crate::error::LookupError;
use crate::lookup::{CityMapping, HistoricalAverages, HistoricalFeatureTable};

/// Both lookup tables, loaded once and shared by every predict request.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub cities: CityMapping,
    pub history: HistoricalFeatureTable,
}

/// Outcome of a successful lookup for one `(city, month)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub city_code: i64,
    pub month: u32,
    pub averages: &'a HistoricalAverages,
}

impl LookupTables {
    pub fn new(cities: CityMapping, history: HistoricalFeatureTable) -> Self {
        Self { cities, history }
    }

    /// Validates `city` and `month` and fetches the matching historical record.
    ///
    /// Checks run in order: city, then month range, then table presence.
    /// There is no fallback to a neighbouring month or another city.
    pub fn resolve(&self, city: &str, month: i32) -> Result<Resolved<'_>, LookupError> {
        let city_code = self
            .cities
            .code(city)
            .ok_or_else(|| LookupError::UnknownCity(city.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(LookupError::InvalidMonth(month));
        }
        let month = month as u32;

        let averages = self
            .history
            .get(city, month)
            .ok_or_else(|| LookupError::NoHistoricalData {
                city: city.to_string(),
                month,
            })?;

        Ok(Resolved {
            city_code,
            month,
            averages,
        })
    }
}
