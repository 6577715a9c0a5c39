use anyhow::{Context, Result, bail};

use crate::predict::YearBounds;

/// Runtime configuration, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub city_mapping_path: String,
    pub historical_features_path: String,
    pub dataset_path: String,
    pub model_path: String,
    /// Remote model endpoint; used instead of `model_path` when set.
    pub model_url: Option<String>,
    pub model_token: Option<String>,
    pub year_bounds: Option<YearBounds>,
    pub log_file_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city_mapping_path: "data/city_mapping.json".to_string(),
            historical_features_path: "data/historical_features.csv".to_string(),
            dataset_path: "data/AQI_DATA.csv".to_string(),
            model_path: "data/model.json".to_string(),
            model_url: None,
            model_token: None,
            year_bounds: None,
            log_file_path: "logs/aqi_insight.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let year_min = parse_year(&lookup, "AQI_YEAR_MIN")?;
        let year_max = parse_year(&lookup, "AQI_YEAR_MAX")?;
        let year_bounds = match (year_min, year_max) {
            (None, None) => None,
            (min, max) => {
                let bounds = YearBounds {
                    min: min.unwrap_or(i32::MIN),
                    max: max.unwrap_or(i32::MAX),
                };
                if bounds.min > bounds.max {
                    bail!("AQI_YEAR_MIN {} exceeds AQI_YEAR_MAX {}", bounds.min, bounds.max);
                }
                Some(bounds)
            }
        };

        Ok(Self {
            city_mapping_path: get("AQI_CITY_MAPPING").unwrap_or(defaults.city_mapping_path),
            historical_features_path: get("AQI_HISTORICAL_FEATURES")
                .unwrap_or(defaults.historical_features_path),
            dataset_path: get("AQI_DATASET").unwrap_or(defaults.dataset_path),
            model_path: get("AQI_MODEL").unwrap_or(defaults.model_path),
            model_url: get("AQI_MODEL_URL"),
            model_token: get("AQI_MODEL_TOKEN"),
            year_bounds,
            log_file_path: get("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        })
    }
}

fn parse_year<F>(lookup: &F, key: &str) -> Result<Option<i32>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => {
            let year = value
                .trim()
                .parse::<i32>()
                .with_context(|| format!("{} must be an integer year, got {:?}", key, value))?;
            Ok(Some(year))
        }
        None => Ok(None),
    }
}
