//! Typed CRM API calls built on the GraphQL relay.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call resolves to [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! Request builders are plain functions so the exact query text and
//! variables of every call can be checked without a network.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics so fetch failures
//! degrade to error states without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::json;

use super::graphql::{ApiError, GraphqlRequest, fetch_field};
use super::queries::{self, EntityKind, MutationName, QueryName};
use super::types::{AssignedUser, Board, ImportHistory, Item, Message, Pipeline, Product, Stage, TotalAmounts};
use crate::state::filter::DealFilter;
use crate::state::pipeline::OrderItem;

/// Upload relay endpoint served by the host.
pub const UPLOAD_ENDPOINT: &str = "/upload-file";

/// Messages fetched per page in the inbox.
pub const MESSAGES_PAGE_SIZE: usize = 50;

// =============================================================================
// REQUEST BUILDERS
// =============================================================================

fn entity_request(kind: EntityKind, name: QueryName, variables: serde_json::Value) -> GraphqlRequest {
    GraphqlRequest::new(queries::query(kind, name), variables)
}

#[must_use]
pub fn boards_request(kind: EntityKind) -> GraphqlRequest {
    entity_request(kind, QueryName::Boards, json!({}))
}

#[must_use]
pub fn last_board_request(kind: EntityKind) -> GraphqlRequest {
    entity_request(kind, QueryName::BoardGetLast, json!({}))
}

#[must_use]
pub fn board_detail_request(kind: EntityKind, board_id: &str) -> GraphqlRequest {
    entity_request(kind, QueryName::BoardDetail, json!({ "_id": board_id }))
}

#[must_use]
pub fn pipelines_request(kind: EntityKind, board_id: &str) -> GraphqlRequest {
    entity_request(kind, QueryName::Pipelines, json!({ "boardId": board_id }))
}

#[must_use]
pub fn stages_request(kind: EntityKind, pipeline_id: &str, filter: &DealFilter) -> GraphqlRequest {
    entity_request(kind, QueryName::Stages, filter.stage_variables(pipeline_id))
}

#[must_use]
pub fn stage_items_request(
    kind: EntityKind,
    pipeline_id: &str,
    stage_id: &str,
    filter: &DealFilter,
    skip: usize,
) -> GraphqlRequest {
    entity_request(kind, QueryName::Items, filter.item_variables(pipeline_id, stage_id, skip))
}

#[must_use]
pub fn total_amounts_request(kind: EntityKind, pipeline_id: &str, filter: &DealFilter) -> GraphqlRequest {
    entity_request(kind, QueryName::TotalAmounts, filter.total_amount_variables(pipeline_id))
}

#[must_use]
pub fn item_change_request(kind: EntityKind, item_id: &str, stage_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(
        queries::mutation(kind, MutationName::ItemChange),
        json!({ "_id": item_id, "destinationStageId": stage_id }),
    )
}

#[must_use]
pub fn item_order_request(kind: EntityKind, stage_id: &str, orders: &[OrderItem]) -> GraphqlRequest {
    GraphqlRequest::new(
        queries::mutation(kind, MutationName::ItemsUpdateOrder),
        json!({ "stageId": stage_id, "orders": orders }),
    )
}

#[must_use]
pub fn stage_order_request(kind: EntityKind, orders: &[OrderItem]) -> GraphqlRequest {
    GraphqlRequest::new(queries::mutation(kind, MutationName::StagesUpdateOrder), json!({ "orders": orders }))
}

#[must_use]
pub fn conversation_messages_request(conversation_id: &str, skip: usize) -> GraphqlRequest {
    GraphqlRequest::new(
        queries::CONVERSATION_MESSAGES.to_owned(),
        json!({ "conversationId": conversation_id, "skip": skip, "limit": MESSAGES_PAGE_SIZE }),
    )
}

#[must_use]
pub fn import_history_request(job_id: &str) -> GraphqlRequest {
    GraphqlRequest::new(queries::IMPORT_HISTORY_DETAIL.to_owned(), json!({ "_id": job_id }))
}

/// `/upload-file?type=<import_type>` with the type form-encoded.
#[must_use]
pub fn upload_endpoint(import_type: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new()).append_pair("type", import_type).finish();
    format!("{UPLOAD_ENDPOINT}?{query}")
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_failed_message(status: u16) -> String {
    format!("upload failed: {status}")
}

/// Interpret the body of a non-2xx upload reply.
///
/// The relay and the upload service both answer `{"status":"error",
/// "message":...}` on failure; such a body comes back as an error
/// [`UploadResponse`](super::types::UploadResponse) so its message reaches
/// the user. Anything else falls back to [`ApiError::Status`].
#[cfg(any(test, feature = "hydrate"))]
fn failed_upload_response(status: u16, body: &str) -> Result<super::types::UploadResponse, ApiError> {
    match serde_json::from_str::<super::types::UploadResponse>(body) {
        Ok(mut response) if response.message.as_deref().is_some_and(|m| !m.is_empty()) => {
            response.status = Some("error".to_owned());
            Ok(response)
        }
        _ => Err(ApiError::Status(status)),
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_boards(kind: EntityKind) -> Result<Vec<Board>, ApiError> {
    fetch_field(&boards_request(kind), &queries::operation_name(kind, QueryName::Boards)).await
}

/// The board the user opened last, if any.
///
/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_last_board(kind: EntityKind) -> Result<Option<Board>, ApiError> {
    fetch_field(&last_board_request(kind), &queries::operation_name(kind, QueryName::BoardGetLast)).await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_board_detail(kind: EntityKind, board_id: &str) -> Result<Option<Board>, ApiError> {
    fetch_field(&board_detail_request(kind, board_id), &queries::operation_name(kind, QueryName::BoardDetail)).await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_pipelines(kind: EntityKind, board_id: &str) -> Result<Vec<Pipeline>, ApiError> {
    fetch_field(&pipelines_request(kind, board_id), &queries::operation_name(kind, QueryName::Pipelines)).await
}

/// Stages of a pipeline with the filter applied to their counts/amounts.
///
/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_stages(kind: EntityKind, pipeline_id: &str, filter: &DealFilter) -> Result<Vec<Stage>, ApiError> {
    fetch_field(&stages_request(kind, pipeline_id, filter), &queries::operation_name(kind, QueryName::Stages)).await
}

/// One page of items for a stage column.
///
/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_stage_items(
    kind: EntityKind,
    pipeline_id: &str,
    stage_id: &str,
    filter: &DealFilter,
    skip: usize,
) -> Result<Vec<Item>, ApiError> {
    let request = stage_items_request(kind, pipeline_id, stage_id, filter, skip);
    fetch_field(&request, &queries::operation_name(kind, QueryName::Items)).await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_total_amounts(
    kind: EntityKind,
    pipeline_id: &str,
    filter: &DealFilter,
) -> Result<TotalAmounts, ApiError> {
    let request = total_amounts_request(kind, pipeline_id, filter);
    fetch_field(&request, &queries::operation_name(kind, QueryName::TotalAmounts)).await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_products(kind: EntityKind) -> Result<Vec<Product>, ApiError> {
    let request = entity_request(kind, QueryName::Products, json!({}));
    fetch_field(&request, &queries::operation_name(kind, QueryName::Products)).await
}

/// Team members for the assignee filter.
///
/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_users(kind: EntityKind) -> Result<Vec<AssignedUser>, ApiError> {
    let request = entity_request(kind, QueryName::Users, json!({}));
    fetch_field(&request, &queries::operation_name(kind, QueryName::Users)).await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_conversation_messages(conversation_id: &str, skip: usize) -> Result<Vec<Message>, ApiError> {
    fetch_field(&conversation_messages_request(conversation_id, skip), "conversationMessages").await
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn fetch_import_history(job_id: &str) -> Result<ImportHistory, ApiError> {
    fetch_field(&import_history_request(job_id), "importHistoryDetail").await
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Move `item_id` to `stage_id` server-side.
///
/// # Errors
///
/// See [`fetch_field`].
pub async fn change_item_stage(kind: EntityKind, item_id: &str, stage_id: &str) -> Result<(), ApiError> {
    let request = item_change_request(kind, item_id, stage_id);
    fetch_field::<serde_json::Value>(&request, &queries::mutation_name(kind, MutationName::ItemChange)).await?;
    Ok(())
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn update_item_order(kind: EntityKind, stage_id: &str, orders: &[OrderItem]) -> Result<(), ApiError> {
    let request = item_order_request(kind, stage_id, orders);
    fetch_field::<serde_json::Value>(&request, &queries::mutation_name(kind, MutationName::ItemsUpdateOrder)).await?;
    Ok(())
}

/// # Errors
///
/// See [`fetch_field`].
pub async fn update_stage_order(kind: EntityKind, orders: &[OrderItem]) -> Result<(), ApiError> {
    let request = stage_order_request(kind, orders);
    fetch_field::<serde_json::Value>(&request, &queries::mutation_name(kind, MutationName::StagesUpdateOrder))
        .await?;
    Ok(())
}

// =============================================================================
// UPLOAD
// =============================================================================

/// Upload an import spreadsheet as multipart form data.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the form cannot be built or sent,
/// [`ApiError::Status`] for non-2xx answers, and [`ApiError::Decode`] when
/// the body is not an upload response.
#[cfg(feature = "hydrate")]
pub async fn upload_import_file(
    import_type: &str,
    file: &web_sys::File,
) -> Result<super::types::UploadResponse, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Transport(format!("{e:?}")))?;
    form.append_with_blob_and_filename("upload", file, &file.name())
        .map_err(|e| ApiError::Transport(format!("{e:?}")))?;
    let resp = gloo_net::http::Request::post(&upload_endpoint(import_type))
        .body(form)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !resp.ok() {
        let status = resp.status();
        log::warn!("{}", upload_failed_message(status));
        let body = resp.text().await.unwrap_or_default();
        return failed_upload_response(status, &body);
    }
    resp.json::<super::types::UploadResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
