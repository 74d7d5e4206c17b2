use super::*;

// =============================================================
// Board / Pipeline
// =============================================================

#[test]
fn board_deserializes_with_pipelines() {
    let raw = serde_json::json!({
        "_id": "b1",
        "name": "Sales",
        "pipelines": [{ "_id": "p1", "name": "Inbound" }]
    });
    let board: Board = serde_json::from_value(raw).unwrap();
    assert_eq!(board.id, "b1");
    assert_eq!(board.pipelines.len(), 1);
    assert_eq!(board.pipelines[0].id, "p1");
    assert!(board.pipelines[0].board_id.is_none());
}

#[test]
fn board_null_pipelines_become_empty() {
    let raw = serde_json::json!({ "_id": "b1", "name": "Sales", "pipelines": null });
    let board: Board = serde_json::from_value(raw).unwrap();
    assert!(board.pipelines.is_empty());
}

#[test]
fn pipeline_reads_camel_case_board_id() {
    let raw = serde_json::json!({ "_id": "p1", "name": "Inbound", "boardId": "b1" });
    let pipeline: Pipeline = serde_json::from_value(raw).unwrap();
    assert_eq!(pipeline.board_id.as_deref(), Some("b1"));
}

// =============================================================
// Stage
// =============================================================

#[test]
fn stage_reads_total_count_and_amounts() {
    let raw = serde_json::json!({
        "_id": "s1",
        "name": "Qualified",
        "order": 2,
        "amount": { "USD": 1500, "EUR": 20.5, "bogus": "x" },
        "dealsTotalCount": 7
    });
    let stage: Stage = serde_json::from_value(raw).unwrap();
    assert_eq!(stage.order, 2);
    assert_eq!(stage.items_total_count, 7);
    assert_eq!(stage.amount.get("USD"), Some(&1500.0));
    assert_eq!(stage.amount.get("EUR"), Some(&20.5));
    assert!(!stage.amount.contains_key("bogus"));
}

#[test]
fn stage_defaults_missing_numbers() {
    let raw = serde_json::json!({ "_id": "s1", "name": "New", "amount": null });
    let stage: Stage = serde_json::from_value(raw).unwrap();
    assert_eq!(stage.order, 0);
    assert_eq!(stage.items_total_count, 0);
    assert!(stage.amount.is_empty());
}

#[test]
fn stage_accepts_integral_float_and_string_counts() {
    let raw = serde_json::json!({ "_id": "s1", "name": "New", "order": 3.0, "dealsTotalCount": "12" });
    let stage: Stage = serde_json::from_value(raw).unwrap();
    assert_eq!(stage.order, 3);
    assert_eq!(stage.items_total_count, 12);
}

#[test]
fn stage_rejects_fractional_order() {
    let raw = serde_json::json!({ "_id": "s1", "name": "New", "order": 1.5 });
    assert!(serde_json::from_value::<Stage>(raw).is_err());
}

// =============================================================
// Item
// =============================================================

#[test]
fn item_deserializes_full_field_set() {
    let raw = serde_json::json!({
        "_id": "d1",
        "name": "Renewal",
        "stageId": "s1",
        "pipeline": { "_id": "p1", "name": "Inbound" },
        "boardId": "b1",
        "companies": [{ "_id": "c1", "primaryName": "Acme", "website": "acme.test" }],
        "customers": [{ "_id": "cu1", "firstName": "Ada", "primaryEmail": "ada@acme.test" }],
        "assignedUsers": [{ "_id": "u1", "email": "rep@crm.test", "details": { "fullName": "Rep One" } }],
        "amount": { "USD": 99 },
        "closeDate": "2024-03-01T00:00:00.000Z",
        "modifiedAt": 1_700_000_000_000_i64,
        "stage": { "probability": "50%" }
    });
    let item: Item = serde_json::from_value(raw).unwrap();
    assert_eq!(item.stage_id, "s1");
    assert_eq!(item.companies[0].primary_name.as_deref(), Some("Acme"));
    assert_eq!(item.customers[0].first_name.as_deref(), Some("Ada"));
    assert_eq!(item.assigned_users[0].display_name(), "Rep One");
    assert_eq!(item.close_date.as_deref(), Some("2024-03-01T00:00:00.000Z"));
    assert_eq!(item.modified_at.as_deref(), Some("1700000000000"));
    assert_eq!(item.stage.and_then(|s| s.probability).as_deref(), Some("50%"));
}

#[test]
fn item_empty_close_date_is_none() {
    let raw = serde_json::json!({ "_id": "d1", "name": "x", "stageId": "s1", "closeDate": "" });
    let item: Item = serde_json::from_value(raw).unwrap();
    assert!(item.close_date.is_none());
    assert!(item.companies.is_empty());
}

#[test]
fn assigned_user_display_name_falls_back() {
    let user = AssignedUser {
        id: "u1".to_owned(),
        username: None,
        email: Some("rep@crm.test".to_owned()),
        details: Some(UserDetails { full_name: Some("  ".to_owned()), avatar: None }),
    };
    assert_eq!(user.display_name(), "rep@crm.test");

    let bare = AssignedUser { id: "u2".to_owned(), username: None, email: None, details: None };
    assert_eq!(bare.display_name(), "u2");
}

// =============================================================
// Message / import
// =============================================================

#[test]
fn message_keeps_variant_payloads_optional() {
    let raw = serde_json::json!({
        "_id": "m1",
        "content": "hello",
        "userId": null,
        "facebookData": { "postId": "p" },
        "attachments": null
    });
    let message: Message = serde_json::from_value(raw).unwrap();
    assert!(message.user_id.is_none());
    assert!(message.form_widget_data.is_none());
    assert!(message.facebook_data.is_some());
    assert!(message.attachments.is_empty());
    assert!(!message.internal);
}

#[test]
fn import_history_parses_string_counters() {
    let raw = serde_json::json!({
        "_id": "h1",
        "success": "10",
        "failed": "2",
        "total": "12",
        "contentType": "customer",
        "percentage": 83.3,
        "status": "In Progress",
        "errorMsgs": ["row 3: bad email"]
    });
    let history: ImportHistory = serde_json::from_value(raw).unwrap();
    assert_eq!(history.success, 10);
    assert_eq!(history.failed, 2);
    assert_eq!(history.total, 12);
    assert_eq!(history.error_msgs.len(), 1);
}

#[test]
fn upload_response_tolerates_missing_fields() {
    let response: UploadResponse = serde_json::from_str(r#"{"id":"job-1"}"#).unwrap();
    assert_eq!(response.id.as_deref(), Some("job-1"));
    assert!(response.status.is_none());
}
