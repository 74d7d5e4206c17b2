//! Deals page: board/pipeline resolution, header bar, and the pipeline board.
//!
//! SYSTEM CONTEXT
//! ==============
//! All page state lives in the URL. `id` and `pipelineId` pick the board and
//! pipeline; the remaining query parameters are a [`DealFilter`]. A board
//! that arrives without pipelines gets them from the pipelines query. Changing a
//! filter navigates to a new URL, and the pipeline remounts from the query.
//!
//! TRADE-OFFS
//! ==========
//! Remounting on every filter change discards loaded pages, but keeps the
//! pipeline store free of any filter bookkeeping.

#[cfg(test)]
#[path = "deals_test.rs"]
mod deals_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::components::empty_state::EmptyState;
use crate::components::main_action_bar::MainActionBar;
use crate::components::pipeline_board::PipelineContainer;
use crate::components::spinner::Spinner;
use crate::net::api;
use crate::net::queries::EntityKind;
use crate::state::board::{DealBoardState, ViewType, attach_pipelines};
use crate::state::filter::DealFilter;

/// `/deal/board` and `/deal/calendar`.
#[component]
pub fn DealsPage() -> impl IntoView {
    let query = use_query_map();
    let location = use_location();
    let navigate = use_navigate();

    let view_type = Memo::new(move |_| ViewType::from_path(&location.pathname.get()));
    let board_id = Memo::new(move |_| query.with(|q| q.get("id")));
    let pipeline_id = Memo::new(move |_| query.with(|q| q.get("pipelineId")));
    let filter = Memo::new(move |_| query.with(|q| DealFilter::from_query(|key| q.get(key))));

    let boards = LocalResource::new(|| api::fetch_boards(EntityKind::Deal));
    let current = LocalResource::new(move || {
        let id = board_id.get();
        async move {
            let board = match id {
                Some(id) => api::fetch_board_detail(EntityKind::Deal, &id).await,
                None => api::fetch_last_board(EntityKind::Deal).await,
            };
            match board {
                Ok(Some(mut board)) if board.pipelines.is_empty() => {
                    match api::fetch_pipelines(EntityKind::Deal, &board.id).await {
                        Ok(pipelines) => attach_pipelines(&mut board, pipelines),
                        Err(e) => log::warn!("pipelines query for board {} failed: {e}", board.id),
                    }
                    Ok(Some(board))
                }
                other => other,
            }
        }
    });

    let resolved = move || {
        let boards = boards.get()?;
        let current = current.get()?;
        let mut state = DealBoardState { view: view_type.get(), ..DealBoardState::default() };
        match boards {
            Ok(list) => state.boards = list,
            Err(e) => log::warn!("board list query failed: {e}"),
        }
        match current {
            Ok(Some(board)) => state.select(board, pipeline_id.get().as_deref()),
            Ok(None) => {}
            Err(e) => {
                log::warn!("current board query failed: {e}");
                state.error = Some(e.to_string());
            }
        }
        Some(state)
    };

    let on_filter = Callback::new(move |next: DealFilter| {
        let href = deals_href(
            view_type.get_untracked(),
            board_id.get_untracked().as_deref(),
            pipeline_id.get_untracked().as_deref(),
            &next,
        );
        navigate(&href, NavigateOptions::default());
    });

    view! {
        <div class="deals-page">
            <Suspense fallback=|| view! { <Spinner label="Loading boards"/> }>
                {move || {
                    resolved()
                        .map(|state| {
                            let view = state.view;
                            let body = deals_body(&state, filter.get());
                            view! {
                                <MainActionBar
                                    boards=state.boards
                                    current_board=state.current_board
                                    current_pipeline=state.current_pipeline
                                    view_type=view
                                    filter=filter.get()
                                    on_filter=on_filter
                                />
                                <main class="deals-page__content">{body}</main>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

fn deals_body(state: &DealBoardState, filter: DealFilter) -> AnyView {
    if let Some(error) = &state.error {
        return view! { <EmptyState text=error.clone() icon="alert" error=true/> }.into_any();
    }
    let Some(pipeline) = &state.current_pipeline else {
        return view! { <EmptyState text="No pipeline yet" icon="layout"/> }.into_any();
    };
    match state.view {
        ViewType::Board => {
            view! { <PipelineContainer kind=EntityKind::Deal pipeline_id=pipeline.id.clone() filter=filter/> }
                .into_any()
        }
        ViewType::Calendar => {
            view! { <EmptyState text=format!("Calendar of {}", pipeline.name) icon="calendar"/> }.into_any()
        }
    }
}

/// URL of the deals page for a selection and filter set.
#[must_use]
pub fn deals_href(view: ViewType, board_id: Option<&str>, pipeline_id: Option<&str>, filter: &DealFilter) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(id) = board_id {
        query.append_pair("id", id);
    }
    if let Some(id) = pipeline_id {
        query.append_pair("pipelineId", id);
    }
    for (key, value) in filter.to_query_pairs() {
        query.append_pair(key, &value);
    }
    let query = query.finish();
    let path = format!("/deal/{}", view.segment());
    if query.is_empty() { path } else { format!("{path}?{query}") }
}
