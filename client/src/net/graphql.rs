//! GraphQL request envelope and transport.
//!
//! Client-side (hydrate): POSTs to the host's `/graphql` relay via `gloo-net`.
//! Server-side (SSR) and native tests: [`post_graphql`] returns
//! [`ApiError::Unavailable`] because queries only run in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses, GraphQL `errors` arrays and missing
//! payload fields all collapse into [`ApiError`] so containers can render one
//! error state without inspecting the response shape.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "graphql_test.rs"]
mod graphql_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Relative endpoint served by the host relay.
pub const GRAPHQL_ENDPOINT: &str = "/graphql";

/// Errors surfaced by GraphQL and upload calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("{}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("response is missing `{0}`")]
    MissingField(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

/// Standard GraphQL POST body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: serde_json::Value,
}

impl GraphqlRequest {
    #[must_use]
    pub fn new(query: String, variables: serde_json::Value) -> Self {
        Self { query, variables }
    }
}

/// Standard GraphQL response body with the payload left untyped.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

/// Unwrap `data.<field>` into `T`.
///
/// Any entry in `errors` wins over partial data.
///
/// # Errors
///
/// Returns [`ApiError::Graphql`] when the server reported errors,
/// [`ApiError::MissingField`] when `field` is absent, and
/// [`ApiError::Decode`] when the payload does not match `T`.
pub fn extract_field<T: DeserializeOwned>(response: GraphqlResponse, field: &str) -> Result<T, ApiError> {
    if !response.errors.is_empty() {
        return Err(ApiError::Graphql(response.errors.into_iter().map(|e| e.message).collect()));
    }
    let mut data = response.data.ok_or_else(|| ApiError::MissingField(field.to_owned()))?;
    let value = data
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| ApiError::MissingField(field.to_owned()))?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send `request` to the relay and return the raw response body.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] / [`ApiError::Status`] / [`ApiError::Decode`]
/// for network-level failures, or [`ApiError::Unavailable`] outside the browser.
pub async fn post_graphql(request: &GraphqlRequest) -> Result<GraphqlResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(GRAPHQL_ENDPOINT)
            .json(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json::<GraphqlResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Send `request` and unwrap `data.<field>` into `T`.
///
/// # Errors
///
/// See [`post_graphql`] and [`extract_field`].
pub async fn fetch_field<T: DeserializeOwned>(request: &GraphqlRequest, field: &str) -> Result<T, ApiError> {
    let response = post_graphql(request).await?;
    extract_field(response, field)
}
