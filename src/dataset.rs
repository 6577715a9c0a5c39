//! Raw measurement history loading.
//!
//! Rows are kept exactly as read; cleaning happens in the stats aggregator.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One row of the measurement history.
///
/// `timestamp` is the unparsed `dd-mm-yyyy` date. Readings that are empty or
/// unparseable load as `None`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawMeasurement {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "AQI", default, deserialize_with = "csv::invalid_option")]
    pub aqi: Option<f64>,

    #[serde(rename = "PM2.5", default, deserialize_with = "csv::invalid_option")]
    pub pm25: Option<f64>,
    #[serde(rename = "PM10", default, deserialize_with = "csv::invalid_option")]
    pub pm10: Option<f64>,
    #[serde(rename = "NO2", default, deserialize_with = "csv::invalid_option")]
    pub no2: Option<f64>,
    #[serde(rename = "NH3", default, deserialize_with = "csv::invalid_option")]
    pub nh3: Option<f64>,
    #[serde(rename = "SO2", default, deserialize_with = "csv::invalid_option")]
    pub so2: Option<f64>,
    #[serde(rename = "CO", default, deserialize_with = "csv::invalid_option")]
    pub co: Option<f64>,
    #[serde(rename = "O3", default, deserialize_with = "csv::invalid_option")]
    pub o3: Option<f64>,
}

impl RawMeasurement {
    /// Minimal row with just the fields the aggregator reads.
    pub fn new(city: &str, timestamp: &str, aqi: Option<f64>) -> Self {
        Self {
            city: city.to_string(),
            timestamp: timestamp.to_string(),
            aqi,
            ..Default::default()
        }
    }
}

/// Loads the dataset at `path`, gunzipping transparently when it ends in `.gz`.
#[tracing::instrument]
pub fn load_measurements(path: &str) -> Result<Vec<RawMeasurement>> {
    let file = File::open(path).with_context(|| format!("failed to open dataset {}", path))?;
    let reader = BufReader::new(file);

    let rows = if Path::new(path).extension().and_then(|e| e.to_str()) == Some("gz") {
        read_measurements(GzDecoder::new(reader))
    } else {
        read_measurements(reader)
    }
    .with_context(|| format!("failed to read dataset {}", path))?;

    tracing::debug!(rows = rows.len(), "Dataset loaded");
    Ok(rows)
}

/// Reads measurements from any CSV source, preserving row order.
pub fn read_measurements<R: Read>(reader: R) -> Result<Vec<RawMeasurement>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: RawMeasurement = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs;
    use std::io::Write;

    const CSV: &str = "City,Timestamp,PM2.5,PM10,NO2,NH3,SO2,CO,O3,AQI\n\
                       Delhi,01-01-2020,180.5,300.2,50.1,30.0,12.0,1.5,40.0,350\n\
                       Delhi,02-01-2020,,,,,,,,\n\
                       Mumbai,03-01-2020,40.0,80.0,20.0,10.0,5.0,0.8,30.0,n/a\n";

    #[test]
    fn test_read_measurements() {
        let rows = read_measurements(CSV.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].city, "Delhi");
        assert_eq!(rows[0].timestamp, "01-01-2020");
        assert_eq!(rows[0].aqi, Some(350.0));
        assert_eq!(rows[0].pm25, Some(180.5));
        assert_eq!(rows[1].aqi, None);
        assert_eq!(rows[1].pm10, None);
        assert_eq!(rows[2].aqi, None);
    }

    #[test]
    fn test_missing_pollutant_columns_are_none() {
        let csv = "City,Timestamp,AQI\nPatna,05-05-2021,120.5\n";
        let rows = read_measurements(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].aqi, Some(120.5));
        assert_eq!(rows[0].o3, None);
    }

    #[test]
    fn test_load_gzip() {
        let path = format!("{}/aqi_insight_dataset.csv.gz", std::env::temp_dir().display());
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(CSV.as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let rows = load_measurements(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].city, "Mumbai");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_measurements("/nonexistent/aqi.csv").is_err());
    }
}
