//! Deals header: board and pipeline switchers, search, filters, view toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bar never owns filter state. Every edit produces a new [`DealFilter`]
//! handed to `on_filter`; the deals page writes it to the query string and
//! the pipeline remounts from there.

use leptos::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::net::api;
use crate::net::queries::EntityKind;
use crate::net::types::{Board, Pipeline};
use crate::state::board::{ViewType, board_link, other_boards, other_pipelines, pipeline_link, view_link};
use crate::state::filter::{DateBound, DealFilter, DueFilter, IdFilter, split_ids};
use crate::state::ui::UiState;

#[component]
pub fn MainActionBar(
    boards: Vec<Board>,
    current_board: Option<Board>,
    current_pipeline: Option<Pipeline>,
    view_type: ViewType,
    filter: DealFilter,
    on_filter: Callback<DealFilter>,
) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let filter = StoredValue::new(filter);

    let board_items = {
        let others = other_boards(&boards, current_board.as_ref());
        if others.is_empty() {
            view! { <EmptyState text="No other boards" icon="layout" small=true/> }.into_any()
        } else {
            others
                .into_iter()
                .map(|b| view! { <li><a href=board_link(view_type, b)>{b.name.clone()}</a></li> })
                .collect_view()
                .into_any()
        }
    };

    let pipeline_items = {
        let others = other_pipelines(current_board.as_ref(), current_pipeline.as_ref());
        match (&current_board, others.is_empty()) {
            (Some(board), false) => others
                .into_iter()
                .map(|p| view! { <li><a href=pipeline_link(view_type, board, p)>{p.name.clone()}</a></li> })
                .collect_view()
                .into_any(),
            _ => view! { <EmptyState text="No other pipeline" icon="stop" small=true/> }.into_any(),
        }
    };

    let on_search = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let mut next = filter.get_value();
        next.set_search(&event_target_value(&ev));
        on_filter.run(next);
    };

    let board_link_to = |view: ViewType| view_link(view, current_board.as_ref(), current_pipeline.as_ref());
    let board_href = board_link_to(ViewType::Board);
    let calendar_href = board_link_to(ViewType::Calendar);

    view! {
        <header class="page-header main-action-bar">
            <div class="main-action-bar__items">
                <details class="dropdown">
                    <summary class="dropdown__toggle">
                        <span class="main-action-bar__label">"Board:"</span>
                        {current_board.as_ref().map(|b| b.name.clone())}
                    </summary>
                    <ul class="dropdown__menu">{board_items}</ul>
                </details>
                <details class="dropdown">
                    <summary class="dropdown__toggle">
                        <span class="main-action-bar__label">"Pipeline:"</span>
                        {current_pipeline.as_ref().map(|p| p.name.clone())}
                    </summary>
                    <ul class="dropdown__menu">{pipeline_items}</ul>
                </details>
            </div>
            <div class="main-action-bar__actions">
                <input
                    class="form-control main-action-bar__search"
                    type="search"
                    placeholder="Search ..."
                    prop:value=filter.with_value(|f| f.search.clone().unwrap_or_default())
                    on:keydown=on_search
                />
                <button
                    class="btn main-action-bar__filter-toggle"
                    class:btn--active=move || filter.with_value(DealFilter::has_filters)
                    on:click=move |_| ui.update(UiState::toggle_filter)
                >
                    "Filter"
                </button>
                <div class="button-group">
                    <a class="btn" class:btn--active={view_type == ViewType::Board} href=board_href>"Board"</a>
                    <a class="btn" class:btn--active={view_type == ViewType::Calendar} href=calendar_href>"Calendar"</a>
                </div>
            </div>
            <Show when=move || !ui.get().filter_hidden>
                <FilterBox filter=filter view_type=view_type on_filter=on_filter/>
            </Show>
        </header>
    }
}

/// Id-list, date range and due-date filters.
#[component]
fn FilterBox(filter: StoredValue<DealFilter>, view_type: ViewType, on_filter: Callback<DealFilter>) -> impl IntoView {
    let products = LocalResource::new(|| api::fetch_products(EntityKind::Deal));
    let users = LocalResource::new(|| api::fetch_users(EntityKind::Deal));

    let edit = move |change: &dyn Fn(&mut DealFilter)| {
        let mut next = filter.get_value();
        change(&mut next);
        on_filter.run(next);
    };

    let toggle_id = move |which: IdFilter, id: String| {
        edit(&|f: &mut DealFilter| {
            let mut ids = f.ids(which).to_vec();
            if let Some(pos) = ids.iter().position(|x| *x == id) {
                ids.remove(pos);
            } else {
                ids.push(id.clone());
            }
            f.set_ids(which, ids);
        });
    };

    let id_text = move |which: IdFilter| filter.with_value(|f| f.ids(which).join(","));
    let is_selected = move |which: IdFilter, id: &str| filter.with_value(|f| f.ids(which).iter().any(|x| x == id));

    let date_input = move |bound: DateBound, label: &'static str| {
        view! {
            <label class="filter-box__date">
                <span>{label}</span>
                <input
                    class="form-control"
                    type="text"
                    placeholder="YYYY-MM-DD HH:mm"
                    prop:value=filter.with_value(|f| f.date(bound).unwrap_or_default().to_owned())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        edit(&|f: &mut DealFilter| f.set_date(bound, &value));
                    }
                />
                <button class="btn btn--link" title="Delete" on:click=move |_| edit(&|f: &mut DealFilter| f.set_date(bound, ""))>
                    "×"
                </button>
            </label>
        }
    };

    let due_toggle = move |due: DueFilter, label: &'static str| {
        view! {
            <label class="filter-box__due">
                <input
                    type="checkbox"
                    prop:checked=filter.with_value(|f| f.due(due))
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        edit(&|f: &mut DealFilter| f.set_due(due, on));
                    }
                />
                {label}
            </label>
        }
    };

    let id_input = move |which: IdFilter, label: &'static str| {
        view! {
            <label class="filter-box__ids">
                <span>{label}</span>
                <input
                    class="form-control"
                    type="text"
                    placeholder="id1,id2"
                    prop:value=id_text(which)
                    on:change=move |ev| {
                        let ids = split_ids(&event_target_value(&ev));
                        edit(&|f: &mut DealFilter| f.set_ids(which, ids.clone()));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="filter-box">
            <fieldset class="filter-box__group">
                <legend>"Products"</legend>
                <Suspense fallback=|| ()>
                    {move || {
                        products
                            .get()
                            .and_then(Result::ok)
                            .map(|list| {
                                list.into_iter()
                                    .map(|p| {
                                        let id = p.id.clone();
                                        let checked = is_selected(IdFilter::Products, &p.id);
                                        view! {
                                            <label class="filter-box__option">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=checked
                                                    on:change=move |_| toggle_id(IdFilter::Products, id.clone())
                                                />
                                                {p.name}
                                            </label>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </Suspense>
            </fieldset>
            {id_input(IdFilter::Companies, "Companies")}
            {id_input(IdFilter::Customers, "Customers")}
            <fieldset class="filter-box__group">
                <legend>"Team members"</legend>
                <Suspense fallback=|| ()>
                    {move || {
                        users
                            .get()
                            .and_then(Result::ok)
                            .map(|list| {
                                list.into_iter()
                                    .map(|u| {
                                        let id = u.id.clone();
                                        let checked = is_selected(IdFilter::AssignedUsers, &u.id);
                                        view! {
                                            <label class="filter-box__option">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=checked
                                                    on:change=move |_| toggle_id(IdFilter::AssignedUsers, id.clone())
                                                />
                                                {u.display_name()}
                                            </label>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </Suspense>
            </fieldset>
            {view_type
                .shows_date_filters()
                .then(|| {
                    view! {
                        <div class="filter-box__dates">
                            {date_input(DateBound::Start, "Start date")}
                            {date_input(DateBound::End, "End date")}
                        </div>
                    }
                })}
            <div class="filter-box__due-group">
                {due_toggle(DueFilter::NextDay, "Due tomorrow")}
                {due_toggle(DueFilter::NextWeek, "Due next week")}
                {due_toggle(DueFilter::NoCloseDate, "No close date")}
            </div>
        </div>
    }
}
