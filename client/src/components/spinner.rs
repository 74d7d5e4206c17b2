//! Loading indicator.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner__dot" aria-hidden="true"></span>
            <span class="spinner__label">{label.unwrap_or("Loading...")}</span>
        </div>
    }
}
