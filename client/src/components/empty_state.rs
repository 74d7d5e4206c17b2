//! Placeholder shown when a list has nothing to render.

use leptos::prelude::*;

/// Icon plus a short message.
#[component]
pub fn EmptyState(
    #[prop(into)] text: String,
    #[prop(optional)] icon: Option<&'static str>,
    #[prop(optional)] small: bool,
    #[prop(optional)] error: bool,
) -> impl IntoView {
    view! {
        <div class="empty-state" class:empty-state--small=small class:empty-state--error=error>
            {icon.map(|icon| view! { <span class=format!("empty-state__icon icon-{icon}") aria-hidden="true"></span> })}
            <p class="empty-state__text">{text}</p>
        </div>
    }
}
