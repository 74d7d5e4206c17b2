use super::*;
use crate::net::types::Stage;

fn response(raw: serde_json::Value) -> GraphqlResponse {
    serde_json::from_value(raw).unwrap()
}

#[test]
fn request_serializes_standard_body() {
    let req = GraphqlRequest::new("query x { x }".to_owned(), serde_json::json!({ "a": 1 }));
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body, serde_json::json!({ "query": "query x { x }", "variables": { "a": 1 } }));
}

#[test]
fn extract_field_decodes_named_payload() {
    let resp = response(serde_json::json!({
        "data": { "dealStages": [{ "_id": "s1", "name": "New" }] }
    }));
    let stages: Vec<Stage> = extract_field(resp, "dealStages").unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].id, "s1");
}

#[test]
fn extract_field_prefers_errors_over_data() {
    let resp = response(serde_json::json!({
        "data": { "dealStages": [] },
        "errors": [{ "message": "Login required" }, { "message": "boom" }]
    }));
    let err = extract_field::<Vec<Stage>>(resp, "dealStages").unwrap_err();
    assert_eq!(err, ApiError::Graphql(vec!["Login required".to_owned(), "boom".to_owned()]));
    assert_eq!(err.to_string(), "Login required; boom");
}

#[test]
fn extract_field_reports_missing_field() {
    let resp = response(serde_json::json!({ "data": { "other": 1 } }));
    let err = extract_field::<Vec<Stage>>(resp, "dealStages").unwrap_err();
    assert_eq!(err, ApiError::MissingField("dealStages".to_owned()));
}

#[test]
fn extract_field_reports_missing_data() {
    let err = extract_field::<Vec<Stage>>(GraphqlResponse::default(), "dealStages").unwrap_err();
    assert_eq!(err, ApiError::MissingField("dealStages".to_owned()));
}

#[test]
fn extract_field_reports_decode_errors() {
    let resp = response(serde_json::json!({ "data": { "dealStages": "nope" } }));
    let err = extract_field::<Vec<Stage>>(resp, "dealStages").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn null_payload_decodes_into_option() {
    let resp = response(serde_json::json!({ "data": { "dealBoardGetLast": null } }));
    let board: Option<crate::net::types::Board> = extract_field(resp, "dealBoardGetLast").unwrap();
    assert!(board.is_none());
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn post_graphql_is_unavailable_natively() {
    let req = GraphqlRequest::new(String::new(), serde_json::Value::Null);
    let result = post_graphql(&req).await;
    assert_eq!(result.unwrap_err(), ApiError::Unavailable);
}
