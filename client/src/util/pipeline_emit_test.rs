use super::*;
use crate::state::pipeline::OrderItem;

#[test]
fn persist_failed_message_names_the_change() {
    let stage = PipelineCommand::PersistStageOrder { orders: Vec::new() };
    assert_eq!(
        persist_failed_message(&stage, &ApiError::Status(502)),
        "Could not save stage order: server responded with status 502"
    );

    let moved = PipelineCommand::PersistItemStage { item_id: "d1".to_owned(), stage_id: "s2".to_owned() };
    assert_eq!(
        persist_failed_message(&moved, &ApiError::Graphql(vec!["Permission required".to_owned()])),
        "Could not save move: Permission required"
    );
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn persist_is_unavailable_outside_the_browser() {
    let command = PipelineCommand::PersistItemOrder {
        stage_id: "s1".to_owned(),
        orders: vec![OrderItem { id: "d1".to_owned(), order: 0 }],
    };
    assert_eq!(persist(EntityKind::Deal, &command).await, Err(ApiError::Unavailable));
}
