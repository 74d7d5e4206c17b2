//! Draggable deal card shown inside a stage column.

use leptos::prelude::*;

use crate::components::pipeline_board::PipelineContext;
use crate::net::types::Item;
use crate::state::pipeline::{DragKind, DragLocation, DragSession};
use crate::util::format::{format_amounts, format_close_date, initials};

#[component]
pub fn DealCard(item: Item, stage_id: String) -> impl IntoView {
    let ctx = expect_context::<PipelineContext>();
    let state = ctx.state;
    let item_id = StoredValue::new(item.id.clone());
    let stage_id = StoredValue::new(stage_id);

    let position = move || {
        let id = item_id.get_value();
        stage_id.with_value(|stage| state.with_untracked(|s| s.items(stage).iter().position(|i| i.id == id)))
    };

    let on_dragstart = move |ev: leptos::ev::DragEvent| {
        let Some(index) = position() else {
            return;
        };
        ev.stop_propagation();
        #[cfg(feature = "hydrate")]
        {
            if let Some(dt) = ev.data_transfer() {
                let _ = dt.set_data("text/plain", &item_id.get_value());
                dt.set_effect_allowed("move");
            }
        }
        ctx.start_drag(DragSession::new(
            DragKind::Item,
            item_id.get_value(),
            DragLocation::new(stage_id.get_value(), index),
        ));
    };

    let on_dragover = move |_ev: leptos::ev::DragEvent| {
        if let Some(index) = position() {
            ctx.hover(DragLocation::new(stage_id.get_value(), index));
        }
    };

    let amounts = format_amounts(&item.amount);
    let close_date = item.close_date.as_deref().and_then(format_close_date);
    let companies: Vec<String> = item.companies.iter().filter_map(|c| c.primary_name.clone()).collect();
    let customers: Vec<String> = item
        .customers
        .iter()
        .filter_map(|c| c.first_name.clone().or_else(|| c.primary_email.clone()))
        .collect();
    let assignees: Vec<(String, String)> = item
        .assigned_users
        .iter()
        .map(|u| {
            let name = u.display_name();
            (initials(&name), name)
        })
        .collect();

    view! {
        <article
            class="deal-card"
            draggable="true"
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragend=move |_| ctx.finish_drag(None)
        >
            <h5 class="deal-card__name">{item.name}</h5>
            {(!amounts.is_empty())
                .then(|| view! { <p class="deal-card__amount">{amounts.join(", ")}</p> })}
            {(!companies.is_empty())
                .then(|| view! { <p class="deal-card__companies">{companies.join(", ")}</p> })}
            {(!customers.is_empty())
                .then(|| view! { <p class="deal-card__customers">{customers.join(", ")}</p> })}
            <footer class="deal-card__footer">
                {close_date.map(|date| view! { <span class="deal-card__date">{date}</span> })}
                <span class="deal-card__assignees">
                    {assignees
                        .into_iter()
                        .map(|(short, full)| view! { <span class="avatar" title=full>{short}</span> })
                        .collect_view()}
                </span>
            </footer>
        </article>
    }
}
