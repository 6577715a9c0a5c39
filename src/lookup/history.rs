//! Precomputed per-(city, month) pollutant averages.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::Read;

/// Historical averages for one city in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalAverages {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub nh3: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,
    pub aqi: f64,
}

/// A single row of the historical features CSV.
// csv cannot deserialize numbers through `#[serde(flatten)]`, so the
// averages are spelled out here and regrouped afterwards.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "PM2.5_hist_avg")]
    pm25: f64,
    #[serde(rename = "PM10_hist_avg")]
    pm10: f64,
    #[serde(rename = "NO2_hist_avg")]
    no2: f64,
    #[serde(rename = "NH3_hist_avg")]
    nh3: f64,
    #[serde(rename = "SO2_hist_avg")]
    so2: f64,
    #[serde(rename = "CO_hist_avg")]
    co: f64,
    #[serde(rename = "O3_hist_avg")]
    o3: f64,
    #[serde(rename = "AQI_hist_avg")]
    aqi: f64,
}

impl HistoryRow {
    fn averages(&self) -> HistoricalAverages {
        HistoricalAverages {
            pm25: self.pm25,
            pm10: self.pm10,
            no2: self.no2,
            nh3: self.nh3,
            so2: self.so2,
            co: self.co,
            o3: self.o3,
            aqi: self.aqi,
        }
    }
}

/// Exact-match table keyed by `(city, month)`.
///
/// Holds at most one record per key; loading a file with a duplicate key
/// fails rather than silently picking one.
#[derive(Debug, Clone, Default)]
pub struct HistoricalFeatureTable {
    /// Per city, one slot per calendar month (index `month - 1`).
    records: HashMap<String, [Option<HistoricalAverages>; 12]>,
    len: usize,
}

impl HistoricalFeatureTable {
    #[tracing::instrument]
    pub fn load(path: &str) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open historical features {}", path))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("failed to load historical features {}", path))?;
        tracing::info!(records = table.len(), "Historical feature table loaded");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut table = Self::default();

        for result in rdr.deserialize() {
            let row: HistoryRow = result?;
            let averages = row.averages();
            table.insert(row.city, row.month, averages)?;
        }

        Ok(table)
    }

    /// Adds a record, rejecting a month outside `1..=12` or a second record
    /// for the same key.
    pub fn insert(&mut self, city: String, month: u32, averages: HistoricalAverages) -> Result<()> {
        let Some(index) = month_index(month) else {
            bail!("month {} for {} is outside 1..=12", month, city);
        };

        let slot = match self.records.entry(city) {
            Entry::Occupied(entry) => {
                if entry.get()[index].is_some() {
                    bail!("duplicate historical record for {} in month {}", entry.key(), month);
                }
                &mut entry.into_mut()[index]
            }
            Entry::Vacant(entry) => &mut entry.insert([None; 12])[index],
        };
        *slot = Some(averages);
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, city: &str, month: u32) -> Option<&HistoricalAverages> {
        let index = month_index(month)?;
        self.records.get(city)?[index].as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}
