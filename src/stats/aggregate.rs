use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::dataset::RawMeasurement;
use crate::error::StatsError;
use crate::stats::types::{
    BestRecorded, CityStats, HistoricalAverage, Improvement, LatestReading, StatsResult,
};
use crate::stats::utility::{mean, round_to};

const DATE_FORMAT: &str = "%d-%m-%Y";

/// A row that survived cleaning.
struct CleanRecord<'a> {
    city: &'a str,
    date: NaiveDate,
    aqi: f64,
}

#[derive(Default)]
struct CityAccumulator {
    sum: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl CityAccumulator {
    fn push(&mut self, aqi: f64) {
        if self.count == 0 {
            self.min = aqi;
            self.max = aqi;
        } else {
            self.min = self.min.min(aqi);
            self.max = self.max.max(aqi);
        }
        self.sum += aqi;
        self.count += 1;
    }
}

/// Drops rows without a finite AQI value or with a date that is not
/// `dd-mm-yyyy`. Row order is preserved.
fn clean(dataset: &[RawMeasurement]) -> Vec<CleanRecord<'_>> {
    let mut missing_aqi = 0usize;
    let mut non_finite_aqi = 0usize;
    let mut bad_date = 0usize;

    let records: Vec<CleanRecord<'_>> = dataset
        .iter()
        .filter_map(|row| {
            let Some(aqi) = row.aqi else {
                missing_aqi += 1;
                return None;
            };
            if !aqi.is_finite() {
                non_finite_aqi += 1;
                return None;
            }
            let Ok(date) = NaiveDate::parse_from_str(row.timestamp.trim(), DATE_FORMAT) else {
                bad_date += 1;
                return None;
            };
            Some(CleanRecord {
                city: &row.city,
                date,
                aqi,
            })
        })
        .collect();

    debug!(
        kept = records.len(),
        missing_aqi, non_finite_aqi, bad_date, "Dataset cleaned"
    );
    records
}

/// Percentage drop in mean AQI from the first year to the last.
fn improvement(years: &BTreeMap<i32, Vec<f64>>) -> Option<Improvement> {
    let (&from_year, first) = years.first_key_value()?;
    let (&to_year, last) = years.last_key_value()?;

    if from_year == to_year {
        return Some(Improvement {
            percentage: Some(0.0),
            from_year,
            to_year,
        });
    }

    let first_avg = mean(first);
    let last_avg = mean(last);

    let percentage = if first_avg == 0.0 {
        warn!(from_year, "First-year mean AQI is zero, improvement unavailable");
        None
    } else {
        Some(round_to((first_avg - last_avg) / first_avg * 100.0, 1))
    };

    Some(Improvement {
        percentage,
        from_year,
        to_year,
    })
}

/// Derives the stats summary from the raw measurement history.
///
/// "Latest" is the last row after cleaning, in dataset order; the dataset is
/// expected to be sorted chronologically. Ties for the best reading go to the
/// first row. Cities are listed in order of first appearance. All values are
/// rounded half away from zero.
///
/// # Errors
///
/// [`StatsError::EmptyDataset`] if no row survives cleaning.
#[tracing::instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn aggregate(dataset: &[RawMeasurement]) -> Result<StatsResult, StatsError> {
    let records = clean(dataset);

    let Some(last) = records.last() else {
        return Err(StatsError::EmptyDataset);
    };

    let mut best = &records[0];
    let mut total = 0.0;
    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    let mut city_order: Vec<&str> = Vec::new();
    let mut cities: HashMap<&str, CityAccumulator> = HashMap::new();

    for record in &records {
        total += record.aqi;

        if record.aqi < best.aqi {
            best = record;
        }

        years.entry(record.date.year()).or_default().push(record.aqi);

        cities
            .entry(record.city)
            .or_insert_with(|| {
                city_order.push(record.city);
                CityAccumulator::default()
            })
            .push(record.aqi);
    }

    let improvement = improvement(&years).ok_or(StatsError::EmptyDataset)?;

    let city_stats = city_order
        .iter()
        .filter_map(|city| {
            let acc = cities.get(city)?;
            Some(CityStats {
                city: city.to_string(),
                avg_aqi: round_to(acc.sum / acc.count as f64, 2),
                min_aqi: round_to(acc.min, 2),
                max_aqi: round_to(acc.max, 2),
                records: acc.count,
            })
        })
        .collect();

    Ok(StatsResult {
        latest: LatestReading {
            aqi: round_to(last.aqi, 2),
            city: last.city.to_string(),
            date: last.date.format("%d %b %Y").to_string(),
        },
        historical_avg: HistoricalAverage {
            aqi: round_to(total / records.len() as f64, 2),
            period: format!("{}-{}", improvement.from_year, improvement.to_year),
        },
        best_recorded: BestRecorded {
            aqi: round_to(best.aqi, 2),
            city: best.city.to_string(),
            date: best.date.format("%b %Y").to_string(),
        },
        improvement,
        city_stats,
        total_records: records.len(),
    })
}
