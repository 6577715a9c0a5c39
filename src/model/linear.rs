use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{AqiModel, check_feature_names};
use crate::features::FeatureVector;

/// On-disk model artifact.
///
/// ```json
/// {
///   "feature_names": ["City_Encoded", "Year", ...],
///   "coefficients": [0.4, -1.2, ...],
///   "intercept": 12.5
/// }
/// ```
#[derive(Debug, Deserialize)]
struct LinearArtifact {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Linear regression over the fixed feature schema.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.len() != FeatureVector::NUM_FEATURES {
            bail!(
                "expected {} coefficients, got {}",
                FeatureVector::NUM_FEATURES,
                coefficients.len()
            );
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Loads the artifact and refuses it if its feature order differs from ours.
    #[tracing::instrument]
    pub fn load(path: &str) -> Result<Self> {
        let txt = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read model artifact {}", path))?;
        let artifact: LinearArtifact = serde_json::from_str(&txt)
            .with_context(|| format!("failed to parse model artifact {}", path))?;

        check_feature_names(artifact.feature_names.as_slice())?;
        let model = Self::new(artifact.coefficients, artifact.intercept)?;

        tracing::info!(intercept = model.intercept, "Linear model loaded");
        Ok(model)
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

#[async_trait]
impl AqiModel for LinearModel {
    async fn predict(&self, features: &FeatureVector) -> Result<f64> {
        Ok(self.evaluate(&features.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_NAMES;
    use crate::lookup::HistoricalAverages;

    fn features() -> FeatureVector {
        crate::features::build(
            3,
            2024,
            5,
            &HistoricalAverages {
                pm25: 10.0,
                pm10: 20.0,
                no2: 0.0,
                nh3: 0.0,
                so2: 0.0,
                co: 0.0,
                o3: 0.0,
                aqi: 100.0,
            },
        )
    }

    #[tokio::test]
    async fn test_predict_weights_named_slots() {
        // Only PM2.5 and AQI averages carry weight.
        let mut coefficients = vec![0.0; 12];
        coefficients[4] = 2.0;
        coefficients[11] = 0.5;
        let model = LinearModel::new(coefficients, 1.0).unwrap();

        let aqi = model.predict(&features()).await.unwrap();
        assert_eq!(aqi, 1.0 + 2.0 * 10.0 + 0.5 * 100.0);
    }

    #[test]
    fn test_wrong_coefficient_count() {
        assert!(LinearModel::new(vec![1.0; 11], 0.0).is_err());
    }

    #[test]
    fn test_load_rejects_reordered_schema() {
        let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
        names.swap(0, 1);
        let json = serde_json::json!({
            "feature_names": names,
            "coefficients": vec![0.0; 12],
            "intercept": 0.0,
        });
        let path = format!("{}/aqi_insight_model_bad.json", std::env::temp_dir().display());
        fs::write(&path, json.to_string()).unwrap();

        let err = LinearModel::load(&path).unwrap_err();
        assert!(err.to_string().contains("schema mismatch"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_valid_artifact() {
        let json = serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.0; 12],
            "intercept": 42.0,
        });
        let path = format!("{}/aqi_insight_model_ok.json", std::env::temp_dir().display());
        fs::write(&path, json.to_string()).unwrap();

        let model = LinearModel::load(&path).unwrap();
        assert_eq!(model.intercept, 42.0);

        fs::remove_file(&path).unwrap();
    }
}
