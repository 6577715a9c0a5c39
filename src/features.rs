//! Feature vector construction for the AQI model.
//!
//! The model consumes a fixed-order numeric vector. Any reordering here
//! silently corrupts predictions, so the order is pinned by [`FEATURE_NAMES`]
//! and checked by the model adapters at load time.

use serde::Serialize;

use crate::lookup::HistoricalAverages;

/// Column names, in the order the model was trained on.
pub const FEATURE_NAMES: [&str; 12] = [
    "City_Encoded",
    "Year",
    "Month",
    "Quarter",
    "PM2.5_hist_avg",
    "PM10_hist_avg",
    "NO2_hist_avg",
    "NH3_hist_avg",
    "SO2_hist_avg",
    "CO_hist_avg",
    "O3_hist_avg",
    "AQI_hist_avg",
];

/// One model input, built fresh per predict request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub city_code: i64,
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub pm25_avg: f64,
    pub pm10_avg: f64,
    pub no2_avg: f64,
    pub nh3_avg: f64,
    pub so2_avg: f64,
    pub co_avg: f64,
    pub o3_avg: f64,
    pub aqi_avg: f64,
}

impl FeatureVector {
    pub const NUM_FEATURES: usize = FEATURE_NAMES.len();

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.city_code as f64,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.quarter),
            self.pm25_avg,
            self.pm10_avg,
            self.no2_avg,
            self.nh3_avg,
            self.so2_avg,
            self.co_avg,
            self.o3_avg,
            self.aqi_avg,
        ]
    }

    /// `(name, value)` pairs, handy for logging.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES.iter().copied().zip(self.to_vec()).collect()
    }
}

/// Calendar quarter for a month in `1..=12`.
///
/// Callers pass a month already checked by [`LookupTables::resolve`]; a
/// month of 0 saturates to quarter 1 instead of underflowing.
///
/// [`LookupTables::resolve`]: crate::lookup::LookupTables::resolve
pub fn quarter(month: u32) -> u32 {
    month.saturating_sub(1) / 3 + 1
}

/// Assembles the model input.
///
/// `month` must be in `1..=12`, as returned by
/// [`LookupTables::resolve`](crate::lookup::LookupTables::resolve).
pub fn build(city_code: i64, year: i32, month: u32, averages: &HistoricalAverages) -> FeatureVector {
    FeatureVector {
        city_code,
        year,
        month,
        quarter: quarter(month),
        pm25_avg: averages.pm25,
        pm10_avg: averages.pm10,
        no2_avg: averages.no2,
        nh3_avg: averages.nh3,
        so2_avg: averages.so2,
        co_avg: averages.co,
        o3_avg: averages.o3,
        aqi_avg: averages.aqi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(quarter(1), 1);
        assert_eq!(quarter(3), 1);
        assert_eq!(quarter(4), 2);
        assert_eq!(quarter(6), 2);
        assert_eq!(quarter(7), 3);
        assert_eq!(quarter(9), 3);
        assert_eq!(quarter(10), 4);
        assert_eq!(quarter(12), 4);
    }

    #[test]
    fn test_quarter_of_zero_does_not_underflow() {
        assert_eq!(quarter(0), 1);
    }

    #[test]
    fn test_quarter_is_ceil_of_month_over_three() {
        for month in 1..=12u32 {
            assert_eq!(quarter(month), month.div_ceil(3));
        }
    }

    #[test]
    fn test_feature_schema_is_fixed() {
        assert_eq!(
            FEATURE_NAMES,
            [
                "City_Encoded",
                "Year",
                "Month",
                "Quarter",
                "PM2.5_hist_avg",
                "PM10_hist_avg",
                "NO2_hist_avg",
                "NH3_hist_avg",
                "SO2_hist_avg",
                "CO_hist_avg",
                "O3_hist_avg",
                "AQI_hist_avg",
            ]
        );
        assert_eq!(FeatureVector::NUM_FEATURES, 12);
    }

    #[test]
    fn test_values_follow_schema_order() {
        // Distinct values per slot so any swap shows up.
        let averages = HistoricalAverages {
            pm25: 105.0,
            pm10: 106.0,
            no2: 107.0,
            nh3: 108.0,
            so2: 109.0,
            co: 110.0,
            o3: 111.0,
            aqi: 112.0,
        };
        let features = build(101, 2030, 11, &averages);

        assert_eq!(
            features.to_vec(),
            vec![
                101.0, 2030.0, 11.0, 4.0, 105.0, 106.0, 107.0, 108.0, 109.0, 110.0, 111.0, 112.0
            ]
        );

        let named = features.named();
        assert_eq!(named[0], ("City_Encoded", 101.0));
        assert_eq!(named[3], ("Quarter", 4.0));
        assert_eq!(named[11], ("AQI_hist_avg", 112.0));
    }

    #[test]
    fn test_year_is_unconstrained() {
        let averages = HistoricalAverages {
            pm25: 0.0,
            pm10: 0.0,
            no2: 0.0,
            nh3: 0.0,
            so2: 0.0,
            co: 0.0,
            o3: 0.0,
            aqi: 0.0,
        };
        assert_eq!(build(0, -500, 1, &averages).year, -500);
        assert_eq!(build(0, 99_999, 1, &averages).year, 99_999);
    }
}
