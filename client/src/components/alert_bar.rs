//! Stack of dismissible alerts rendered above page content.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any component can queue an alert through `RwSignal<UiState>`; this bar is
//! mounted once in the app root and is the only reader.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Alerts dismiss themselves after this many milliseconds.
#[cfg(feature = "hydrate")]
const ALERT_TTL_MS: u64 = 6_000;

#[component]
pub fn AlertBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="alert-bar" aria-live="polite">
            <For
                each=move || ui.get().alerts
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    #[cfg(feature = "hydrate")]
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::sleep(std::time::Duration::from_millis(ALERT_TTL_MS)).await;
                        let _ = ui.try_update(|u| u.dismiss(id));
                    });
                    view! {
                        <div class=format!("alert {}", alert.kind.class())>
                            <span class="alert__message">{alert.message}</span>
                            <button
                                class="alert__close"
                                title="Dismiss"
                                on:click=move |_| ui.update(|u| u.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
