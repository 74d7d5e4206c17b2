use super::*;
use crate::net::graphql::extract_field;
use crate::net::graphql::GraphqlResponse;

const DEAL: EntityKind = EntityKind::Deal;

// =============================================================
// request builders
// =============================================================

#[test]
fn stages_request_uses_stage_query_and_filter_variables() {
    let mut filter = DealFilter::default();
    filter.set_search("acme");
    let request = stages_request(DEAL, "p1", &filter);
    assert!(request.query.contains("query dealStages("));
    assert_eq!(request.variables["pipelineId"], "p1");
    assert_eq!(request.variables["search"], "acme");
}

#[test]
fn stage_items_request_pages_by_skip() {
    let request = stage_items_request(DEAL, "p1", "s1", &DealFilter::default(), 40);
    assert!(request.query.contains("query deals("));
    assert_eq!(request.variables["stageId"], "s1");
    assert_eq!(request.variables["skip"], 40);
}

#[test]
fn board_requests_carry_ids() {
    assert_eq!(board_detail_request(DEAL, "b1").variables, serde_json::json!({ "_id": "b1" }));
    assert_eq!(pipelines_request(DEAL, "b1").variables, serde_json::json!({ "boardId": "b1" }));
    assert!(boards_request(DEAL).query.contains("dealBoards"));
    assert!(last_board_request(DEAL).query.contains("dealBoardGetLast"));
}

#[test]
fn item_change_request_targets_destination_stage() {
    let request = item_change_request(DEAL, "d1", "s2");
    assert!(request.query.contains("mutation dealsChange("));
    assert_eq!(request.variables, serde_json::json!({ "_id": "d1", "destinationStageId": "s2" }));
}

#[test]
fn order_requests_serialize_order_items() {
    let orders = vec![OrderItem { id: "d1".to_owned(), order: 0 }, OrderItem { id: "d2".to_owned(), order: 1 }];
    let items = item_order_request(DEAL, "s1", &orders);
    assert!(items.query.contains("dealsUpdateOrder"));
    assert_eq!(
        items.variables,
        serde_json::json!({
            "stageId": "s1",
            "orders": [{ "_id": "d1", "order": 0 }, { "_id": "d2", "order": 1 }]
        })
    );

    let stages = stage_order_request(DEAL, &orders[..1]);
    assert!(stages.query.contains("dealStagesUpdateOrder"));
    assert_eq!(stages.variables, serde_json::json!({ "orders": [{ "_id": "d1", "order": 0 }] }));
}

#[test]
fn conversation_request_pages_messages() {
    let request = conversation_messages_request("c1", 0);
    assert!(request.query.contains("conversationMessages("));
    assert_eq!(request.variables["conversationId"], "c1");
    assert_eq!(request.variables["limit"], MESSAGES_PAGE_SIZE);
}

#[test]
fn import_history_request_carries_job_id() {
    let request = import_history_request("job-1");
    assert!(request.query.contains("importHistoryDetail("));
    assert_eq!(request.variables, serde_json::json!({ "_id": "job-1" }));
}

#[test]
fn upload_endpoint_encodes_type() {
    assert_eq!(upload_endpoint("customer"), "/upload-file?type=customer");
    assert_eq!(upload_endpoint("a b&c"), "/upload-file?type=a+b%26c");
}

#[test]
fn upload_failed_message_formats_status() {
    assert_eq!(upload_failed_message(413), "upload failed: 413");
}

#[test]
fn failed_upload_keeps_server_message() {
    let response = failed_upload_response(400, r#"{"status":"error","message":"Invalid file type"}"#).unwrap();
    assert_eq!(response.message.as_deref(), Some("Invalid file type"));
    assert_eq!(
        crate::state::import::classify_upload(&response),
        crate::state::import::UploadOutcome::Failed("Invalid file type".to_owned())
    );
}

#[test]
fn failed_upload_message_without_status_is_still_an_error() {
    let response = failed_upload_response(500, r#"{"message":"disk full"}"#).unwrap();
    assert_eq!(response.status.as_deref(), Some("error"));
}

#[test]
fn failed_upload_without_message_falls_back_to_status() {
    assert_eq!(failed_upload_response(413, "Payload Too Large"), Err(ApiError::Status(413)));
    assert_eq!(failed_upload_response(502, r#"{"status":"error"}"#), Err(ApiError::Status(502)));
    assert_eq!(failed_upload_response(500, ""), Err(ApiError::Status(500)));
}

// =============================================================
// payload decoding through operation names
// =============================================================

#[test]
fn stages_payload_decodes_under_operation_name() {
    let response: GraphqlResponse = serde_json::from_value(serde_json::json!({
        "data": { "dealStages": [{ "_id": "s1", "name": "Lead", "dealsTotalCount": 3 }] }
    }))
    .unwrap();
    let field = queries::operation_name(DEAL, QueryName::Stages);
    let stages: Vec<Stage> = extract_field(response, &field).unwrap();
    assert_eq!(stages[0].items_total_count, 3);
}

#[test]
fn last_board_null_decodes_to_none() {
    let response: GraphqlResponse =
        serde_json::from_value(serde_json::json!({ "data": { "dealBoardGetLast": null } })).unwrap();
    let board: Option<Board> = extract_field(response, "dealBoardGetLast").unwrap();
    assert!(board.is_none());
}
