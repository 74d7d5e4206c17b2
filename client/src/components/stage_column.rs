//! One stage of a pipeline: header, lazily loaded cards, and drop target.
//!
//! SYSTEM CONTEXT
//! ==============
//! A column asks the store to mark itself loading the first time it mounts
//! in the browser and fetches its first page only when the store agrees,
//! so remounts after a stage reorder never refetch.

use leptos::prelude::*;

use crate::components::deal_card::DealCard;
use crate::components::pipeline_board::PipelineContext;
use crate::components::spinner::Spinner;
use crate::state::pipeline::{DragKind, DragLocation, DragSession, PIPELINE_DROPPABLE_ID, StageLoad};
use crate::util::format::format_amounts;

#[component]
pub fn StageColumn(stage_id: String) -> impl IntoView {
    let ctx = expect_context::<PipelineContext>();
    let state = ctx.state;
    let stage_id = StoredValue::new(stage_id);

    Effect::new(move || load_page(ctx, &stage_id.get_value(), false));

    let name = move || stage_id.with_value(|id| state.with(|s| s.stage_map.get(id).map(|st| st.name.clone())));
    let total = move || stage_id.with_value(|id| state.with(|s| s.stage_map.get(id).map_or(0, |st| st.items_total_count)));
    let amounts = move || {
        stage_id.with_value(|id| state.with(|s| s.stage_map.get(id).map(|st| format_amounts(&st.amount)).unwrap_or_default()))
    };
    let loading = move || stage_id.with_value(|id| state.with(|s| s.load_state(id) == StageLoad::Loading));
    let has_more = move || stage_id.with_value(|id| state.with(|s| s.load_state(id) == StageLoad::Loaded && s.has_more(id)));
    let items = move || stage_id.with_value(|id| state.with(|s| s.items(id).to_vec()));

    let on_header_dragstart = move |_ev: leptos::ev::DragEvent| {
        let id = stage_id.get_value();
        let Some(index) = state.with_untracked(|s| s.stage_ids.iter().position(|x| *x == id)) else {
            return;
        };
        ctx.start_drag(DragSession::new(DragKind::Stage, id, DragLocation::new(PIPELINE_DROPPABLE_ID, index)));
    };

    let on_dragover = move |ev: leptos::ev::DragEvent| {
        if ctx.drag.with_untracked(Option::is_some) {
            ev.prevent_default();
        }
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        let id = stage_id.get_value();
        let len = state.with_untracked(|s| s.items(&id).len());
        let Some((kind, index)) = ctx.drag.with_untracked(|d| d.as_ref().map(|d| (d.kind, d.item_drop_index(&id, len))))
        else {
            return;
        };
        let destination = match kind {
            DragKind::Item => DragLocation::new(id, index),
            DragKind::Stage => {
                let Some(index) = state.with_untracked(|s| s.stage_ids.iter().position(|x| *x == id)) else {
                    return;
                };
                DragLocation::new(PIPELINE_DROPPABLE_ID, index)
            }
        };
        ctx.finish_drag(Some(destination));
    };

    let on_dragleave = move |_ev: leptos::ev::DragEvent| stage_id.with_value(|id| ctx.clear_hover(id));

    view! {
        <section class="stage" on:dragover=on_dragover on:dragleave=on_dragleave on:drop=on_drop>
            <header
                class="stage__header"
                draggable="true"
                on:dragstart=on_header_dragstart
                on:dragend=move |_| ctx.finish_drag(None)
            >
                <h4 class="stage__name">{name}</h4>
                <span class="stage__count">{total}</span>
                <div class="stage__amounts">
                    {move || {
                        amounts()
                            .into_iter()
                            .map(|label| view! { <span class="stage__amount">{label}</span> })
                            .collect_view()
                    }}
                </div>
            </header>
            <div class="stage__body" data-droppable=move || stage_id.get_value()>
                <For
                    each=items
                    key=|item| item.id.clone()
                    children=move |item| {
                        view! { <DealCard item=item stage_id=stage_id.get_value()/> }
                    }
                />
                <div class="stage__tail" on:dragover=on_dragleave></div>
                <Show when=loading>
                    <Spinner/>
                </Show>
                <Show when=has_more>
                    <button class="btn stage__more" on:click=move |_| load_page(ctx, &stage_id.get_value(), true)>
                        "Load more"
                    </button>
                </Show>
            </div>
        </section>
    }
}

/// Fetch the first page (`more == false`, only on the `Unloaded → Loading`
/// transition) or the next page of `stage_id`.
fn load_page(ctx: PipelineContext, stage_id: &str, more: bool) {
    let skip = if more {
        ctx.state.with_untracked(|s| s.items(stage_id).len())
    } else {
        if !ctx.state.try_update(|s| s.begin_load(stage_id)).unwrap_or(false) {
            return;
        }
        0
    };

    #[cfg(feature = "hydrate")]
    {
        use crate::state::pipeline::PipelineAction;

        let stage_id = stage_id.to_owned();
        let pipeline_id = ctx.pipeline_id.get_value();
        let filter = ctx.filter.get_value();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_stage_items(ctx.kind, &pipeline_id, &stage_id, &filter, skip).await;
            match result {
                Ok(items) if more => ctx.dispatch(PipelineAction::StageMoreLoaded { stage_id, items }),
                Ok(items) => ctx.dispatch(PipelineAction::StageLoaded { stage_id, items }),
                Err(e) => {
                    log::warn!("items query for stage {stage_id} failed: {e}");
                    if !more {
                        ctx.dispatch(PipelineAction::StageLoadFailed(stage_id));
                    }
                    ctx.ui.update(|u| {
                        u.error(e.to_string());
                    });
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (skip, more);
    }
}
