//! HTTP plumbing for talking to a model-serving endpoint.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// POSTs `body` as JSON to `url` and decodes the JSON response.
///
/// Non-2xx responses are errors.
pub async fn post_json<C, B, R>(client: &C, url: &str, body: &B) -> Result<R>
where
    C: HttpClient,
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut req = reqwest::Request::new(
        reqwest::Method::POST,
        url.parse().with_context(|| format!("invalid url {}", url))?,
    );
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.json::<R>().await?)
}
