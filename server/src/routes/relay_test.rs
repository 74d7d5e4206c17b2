use axum::http::HeaderValue;

use super::*;

#[test]
fn relay_error_status_maps_transport_failures_to_bad_gateway() {
    assert_eq!(RelayError::Upstream("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(RelayError::Body("reset".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(RelayError::MissingContentType.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn upstream_url_appends_query() {
    assert_eq!(upstream_url("http://crm/upload-file", Some("type=deal")), "http://crm/upload-file?type=deal");
    assert_eq!(upstream_url("http://crm/upload?x=1", Some("type=deal")), "http://crm/upload?x=1&type=deal");
}

#[test]
fn upstream_url_ignores_missing_or_empty_query() {
    assert_eq!(upstream_url("http://crm/upload-file", None), "http://crm/upload-file");
    assert_eq!(upstream_url("http://crm/upload-file", Some("")), "http://crm/upload-file");
}

#[test]
fn forwarded_headers_keeps_only_allowed_names() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
    headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));

    let out = forwarded_headers(&headers);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t");
    assert_eq!(out.get_all(header::COOKIE).iter().count(), 2);
    assert!(out.get(header::HOST).is_none());
    assert!(out.get(header::CONTENT_LENGTH).is_none());
}

#[test]
fn relay_error_response_carries_status_and_message() {
    let response = RelayError::MissingContentType.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
}
