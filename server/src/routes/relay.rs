//! GraphQL and upload relays to the CRM API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only talks to this host. `/graphql` and `/upload-file` are
//! forwarded byte-for-byte to the configured upstream, so the client never
//! needs CORS access to the CRM API.
//!
//! ERROR HANDLING
//! ==============
//! Upstream HTTP errors are passed through with their status and body.
//! Transport failures become [`RelayError`], answered as
//! `{"status":"error","message":...}`, which the import screen already
//! understands.

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::state::AppState;

/// Request headers copied to the upstream request.
const FORWARDED_HEADERS: [&str; 3] = ["authorization", "cookie", "accept-language"];

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream response read failed: {0}")]
    Body(String),

    #[error("missing content-type header")]
    MissingContentType,
}

impl RelayError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::Body(_) => StatusCode::BAD_GATEWAY,
            Self::MissingContentType => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "relay failed");
        (self.status(), Json(json!({ "status": "error", "message": self.to_string() }))).into_response()
    }
}

/// `POST /graphql`: forward a GraphQL request body.
pub async fn graphql(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Result<Response, RelayError> {
    let request = state
        .http
        .post(state.config.graphql_url())
        .headers(forwarded_headers(&headers))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    let response = request.send().await.map_err(|e| RelayError::Upstream(e.to_string()))?;
    passthrough(response).await
}

/// `POST /upload-file?type=...`: forward a multipart upload, query included.
pub async fn upload_file(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let content_type = headers.get(header::CONTENT_TYPE).cloned().ok_or(RelayError::MissingContentType)?;
    let url = upstream_url(&state.config.crm_upload_url, query.as_deref());
    tracing::info!(bytes = body.len(), %url, "relaying upload");

    let response = state
        .http
        .post(url)
        .headers(forwarded_headers(&headers))
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await
        .map_err(|e| RelayError::Upstream(e.to_string()))?;
    passthrough(response).await
}

/// Copy status, content type and body of an upstream response.
async fn passthrough(response: reqwest::Response) -> Result<Response, RelayError> {
    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let body = response.bytes().await.map_err(|e| RelayError::Body(e.to_string()))?;
    if !status.is_success() {
        tracing::debug!(%status, "upstream returned an error status");
    }

    let mut out = (status, body).into_response();
    if let Some(content_type) = content_type {
        out.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(out)
}

/// `base` with the incoming query string appended.
#[must_use]
pub fn upstream_url(base: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) if base.contains('?') => format!("{base}&{query}"),
        Some(query) => format!("{base}?{query}"),
        None => base.to_owned(),
    }
}

/// Subset of `headers` named in [`FORWARDED_HEADERS`].
#[must_use]
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        for value in headers.get_all(name) {
            out.append(HeaderName::from_static(name), value.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
