//! The trained AQI model, treated as an opaque function of a [`FeatureVector`].
//!
//! [`LinearModel`] evaluates an exported coefficient artifact locally.
//! [`RemoteModel`] delegates to a model-serving endpoint over HTTP.

mod linear;
mod remote;

pub use linear::LinearModel;
pub use remote::RemoteModel;

use anyhow::Result;
use async_trait::async_trait;

use crate::features::{FEATURE_NAMES, FeatureVector};

#[async_trait]
pub trait AqiModel: Send + Sync {
    /// Predicts the AQI for one feature vector.
    async fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

#[async_trait]
impl<M: AqiModel + ?Sized> AqiModel for Box<M> {
    async fn predict(&self, features: &FeatureVector) -> Result<f64> {
        (**self).predict(features).await
    }
}

/// Fails unless `names` matches the feature schema exactly, order included.
pub fn check_feature_names<S: AsRef<str>>(names: &[S]) -> Result<()> {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    if names != FEATURE_NAMES {
        anyhow::bail!(
            "model feature schema mismatch: expected {:?}, got {:?}",
            FEATURE_NAMES,
            names
        );
    }
    Ok(())
}
