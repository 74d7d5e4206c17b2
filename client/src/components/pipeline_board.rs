//! Pipeline board: stage query container and the drag-and-drop column row.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`PipelineContainer`] runs the stage query for one pipeline and seeds a
//! fresh [`PipelineState`]. [`PipelineBoard`] renders one [`StageColumn`] per
//! stage; columns load their own items. Every write goes through
//! [`PipelineContext::dispatch`], which forwards the returned persistence
//! commands to [`send_commands`].
//!
//! DESIGN
//! ======
//! Drag and drop uses native HTML5 drag events. `dragstart` records a
//! [`DragSession`]; a `drop` on a column resolves it with a destination;
//! `dragend` resolves whatever is left with no destination, which the store
//! treats as a cancelled drag. Cards report the slot under the pointer into
//! the session, so a new drag never sees the previous one's slot.

use leptos::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::components::spinner::Spinner;
use crate::components::stage_column::StageColumn;
use crate::net::api;
use crate::net::queries::EntityKind;
use crate::state::filter::DealFilter;
use crate::state::pipeline::{
    DragLocation, DragSession, PIPELINE_DROPPABLE_ID, PipelineAction, PipelineState, build_stage_maps,
};
use crate::state::ui::UiState;
use crate::util::format::format_amount;
use crate::util::pipeline_emit::send_commands;

/// Handles shared by every component of one mounted pipeline.
#[derive(Clone, Copy)]
pub struct PipelineContext {
    pub kind: EntityKind,
    pub pipeline_id: StoredValue<String>,
    pub filter: StoredValue<DealFilter>,
    pub state: RwSignal<PipelineState>,
    pub drag: RwSignal<Option<DragSession>>,
    pub ui: RwSignal<UiState>,
}

impl PipelineContext {
    /// Apply `action` to the store and send the commands it produced.
    pub fn dispatch(&self, action: PipelineAction) {
        let mut commands = Vec::new();
        self.state.update(|s| commands = s.dispatch(action));
        send_commands(self.kind, commands, self.ui);
    }

    pub fn start_drag(&self, session: DragSession) {
        self.drag.set(Some(session));
    }

    /// Record the card slot under the pointer for the active drag.
    pub fn hover(&self, location: DragLocation) {
        let changed = self.drag.with_untracked(|d| d.as_ref().is_some_and(|s| s.hover.as_ref() != Some(&location)));
        if changed {
            self.drag.update(|d| {
                if let Some(session) = d {
                    session.hover_over(location);
                }
            });
        }
    }

    pub fn clear_hover(&self, droppable_id: &str) {
        let hovering = self
            .drag
            .with_untracked(|d| d.as_ref().is_some_and(|s| s.hover.as_ref().is_some_and(|h| h.droppable_id == droppable_id)));
        if hovering {
            self.drag.update(|d| {
                if let Some(session) = d {
                    session.clear_hover(droppable_id);
                }
            });
        }
    }

    /// Resolve the drag in progress. No-op when none is active, which is the
    /// case for the `dragend` that follows a successful drop.
    pub fn finish_drag(&self, destination: Option<DragLocation>) {
        let Some(session) = self.drag.try_update(Option::take).flatten() else {
            return;
        };
        self.dispatch(PipelineAction::DragEnd(session.finish(destination)));
    }
}

/// Fetches the stages of `pipeline_id` and mounts a board for them.
#[component]
pub fn PipelineContainer(kind: EntityKind, pipeline_id: String, filter: DealFilter) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let ctx = PipelineContext {
        kind,
        pipeline_id: StoredValue::new(pipeline_id),
        filter: StoredValue::new(filter),
        state: RwSignal::new(PipelineState::default()),
        drag: RwSignal::new(None),
        ui,
    };
    provide_context(ctx);

    let stages = LocalResource::new(move || {
        let pipeline_id = ctx.pipeline_id.get_value();
        let filter = ctx.filter.get_value();
        async move { api::fetch_stages(kind, &pipeline_id, &filter).await }
    });

    view! {
        <div class="pipeline-container">
            <PipelineTotals/>
            <Suspense fallback=move || view! { <Spinner/> }>
                {move || {
                    stages
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                ctx.dispatch(PipelineAction::Reset(build_stage_maps(list)));
                                view! { <PipelineBoard/> }.into_any()
                            }
                            Err(e) => {
                                log::warn!("stage query failed: {e}");
                                view! { <EmptyState text=e.to_string() icon="info-circled" error=true/> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Horizontal row of stage columns, or an empty state for a stageless pipeline.
#[component]
pub fn PipelineBoard() -> impl IntoView {
    let ctx = expect_context::<PipelineContext>();
    let state = ctx.state;

    let has_stages = move || state.with(PipelineState::has_stages);
    let stage_ids = move || state.with(|s| s.visible_stages().into_iter().map(|st| st.id.clone()).collect::<Vec<_>>());

    view! {
        <Show
            when=has_stages
            fallback=|| view! { <EmptyState text="No stage in this pipeline" icon="move"/> }
        >
            <div
                class="pipeline"
                data-droppable=PIPELINE_DROPPABLE_ID
                on:dragover=|ev: leptos::ev::DragEvent| ev.prevent_default()
            >
                <For
                    each=stage_ids
                    key=|id| id.clone()
                    children=|stage_id| view! { <StageColumn stage_id=stage_id/> }
                />
            </div>
        </Show>
    }
}

/// Deal count and per-currency totals for the filtered pipeline.
#[component]
fn PipelineTotals() -> impl IntoView {
    let ctx = expect_context::<PipelineContext>();
    let totals = LocalResource::new(move || {
        let pipeline_id = ctx.pipeline_id.get_value();
        let filter = ctx.filter.get_value();
        async move { api::fetch_total_amounts(ctx.kind, &pipeline_id, &filter).await }
    });

    view! {
        <Suspense fallback=|| ()>
            {move || {
                totals
                    .get()
                    .and_then(Result::ok)
                    .map(|totals| {
                        let labels: Vec<String> = totals
                            .deal_amounts
                            .iter()
                            .map(|a| format!("{} {}", format_amount(a.amount), a.currency))
                            .collect();
                        view! {
                            <div class="pipeline-totals">
                                <span class="pipeline-totals__count">{format!("{} deals", totals.deal_count)}</span>
                                {labels
                                    .into_iter()
                                    .map(|label| view! { <span class="pipeline-totals__amount">{label}</span> })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
        </Suspense>
    }
}
