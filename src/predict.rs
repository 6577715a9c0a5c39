//! The predict operation: resolve, build features, run the model, categorize.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

use crate::category::{Category, categorize};
use crate::error::PredictError;
use crate::features;
use crate::lookup::LookupTables;
use crate::model::AqiModel;
use crate::stats::utility::round_to;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionRequest {
    pub city: String,
    pub year: i32,
    pub month: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Rounded to two decimals.
    pub aqi: f64,
    pub category: Category,
    pub city: String,
    pub year: i32,
    pub month: u32,
}

/// Inclusive range of accepted request years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Serves predict requests against shared, read-only tables and model.
///
/// Years are unconstrained unless bounds are configured.
pub struct Predictor<M> {
    tables: Arc<LookupTables>,
    model: M,
    year_bounds: Option<YearBounds>,
}

impl<M: AqiModel> Predictor<M> {
    pub fn new(tables: Arc<LookupTables>, model: M) -> Self {
        Self {
            tables,
            model,
            year_bounds: None,
        }
    }

    pub fn with_year_bounds(mut self, bounds: Option<YearBounds>) -> Self {
        self.year_bounds = bounds;
        self
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    #[tracing::instrument(skip(self, request), fields(city = %request.city, year = request.year, month = request.month))]
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError> {
        let resolved = self.tables.resolve(&request.city, request.month)?;

        if let Some(bounds) = self.year_bounds {
            if !bounds.contains(request.year) {
                return Err(PredictError::YearOutOfRange {
                    year: request.year,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }

        let features = features::build(
            resolved.city_code,
            request.year,
            resolved.month,
            resolved.averages,
        );
        debug!(features = ?features.named(), "Feature vector built");

        let raw = self.model.predict(&features).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "Model invocation failed");
            PredictError::Model(e)
        })?;

        if !raw.is_finite() {
            error!(value = raw, "Model returned a non-finite prediction");
            return Err(PredictError::NonFiniteOutput(raw));
        }

        Ok(PredictionResult {
            aqi: round_to(raw, 2),
            category: categorize(raw),
            city: request.city.clone(),
            year: request.year,
            month: resolved.month,
        })
    }
}
