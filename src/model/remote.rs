use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AqiModel;
use crate::features::{FEATURE_NAMES, FeatureVector};
use crate::fetch::{HttpClient, post_json};

#[derive(Serialize)]
struct PredictRequest<'a> {
    feature_names: &'a [&'static str],
    features: Vec<f64>,
}

#[derive(Deserialize)]
struct PredictResponse {
    prediction: f64,
}

/// Calls a model-serving endpoint that accepts one named feature row.
///
/// Sends `{"feature_names": [...], "features": [...]}` and expects
/// `{"prediction": <number>}` back. Names travel with the values so the
/// server can verify column order.
pub struct RemoteModel<C> {
    client: C,
    url: String,
}

impl<C: HttpClient> RemoteModel<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> AqiModel for RemoteModel<C> {
    #[tracing::instrument(skip(self, features), fields(url = %self.url))]
    async fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let body = PredictRequest {
            feature_names: &FEATURE_NAMES,
            features: features.to_vec(),
        };
        let resp: PredictResponse = post_json(&self.client, &self.url, &body)
            .await
            .with_context(|| format!("model endpoint {} failed", self.url))?;
        Ok(resp.prediction)
    }
}
