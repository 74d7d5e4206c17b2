//! Persistence of pipeline drag results.
//!
//! [`PipelineState::dispatch`](crate::state::pipeline::PipelineState::dispatch)
//! reorders optimistically and returns [`PipelineCommand`]s. This module sends
//! the matching mutation for each command, in order, on one task, so a stage
//! change always lands before the order updates that depend on it. A failed
//! mutation is logged and surfaced as an alert; the optimistic local order is
//! kept.

#[cfg(test)]
#[path = "pipeline_emit_test.rs"]
mod pipeline_emit_test;

use leptos::prelude::RwSignal;
#[cfg(feature = "hydrate")]
use leptos::prelude::Update;

use crate::net::api;
use crate::net::graphql::ApiError;
use crate::net::queries::EntityKind;
use crate::state::pipeline::PipelineCommand;
use crate::state::ui::UiState;

/// Send the mutation that persists `command`.
///
/// # Errors
///
/// Propagates the [`ApiError`] of the underlying mutation.
pub async fn persist(kind: EntityKind, command: &PipelineCommand) -> Result<(), ApiError> {
    match command {
        PipelineCommand::PersistItemStage { item_id, stage_id } => api::change_item_stage(kind, item_id, stage_id).await,
        PipelineCommand::PersistItemOrder { stage_id, orders } => api::update_item_order(kind, stage_id, orders).await,
        PipelineCommand::PersistStageOrder { orders } => api::update_stage_order(kind, orders).await,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn persist_failed_message(command: &PipelineCommand, error: &ApiError) -> String {
    let what = match command {
        PipelineCommand::PersistItemStage { .. } => "move",
        PipelineCommand::PersistItemOrder { .. } => "item order",
        PipelineCommand::PersistStageOrder { .. } => "stage order",
    };
    format!("Could not save {what}: {error}")
}

/// Send `commands` in order. No-op when `commands` is empty or outside the
/// browser.
pub fn send_commands(kind: EntityKind, commands: Vec<PipelineCommand>, ui: RwSignal<UiState>) {
    if commands.is_empty() {
        return;
    }
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            for command in commands {
                if let Err(e) = persist(kind, &command).await {
                    log::warn!("pipeline persist failed: {e}");
                    ui.update(|u| {
                        u.error(persist_failed_message(&command, &e));
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, commands, ui);
    }
}
