//! Inbox conversation page: message list of one conversation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Messages are classified once as they enter [`InboxState`]; the list only
//! renders [`Message`] components. Older pages are appended on demand.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::empty_state::EmptyState;
use crate::components::message::Message;
use crate::components::spinner::Spinner;
use crate::net::api::{self, MESSAGES_PAGE_SIZE};
use crate::state::inbox::InboxState;
use crate::state::ui::UiState;

/// `/inbox/{conversation_id}`.
#[component]
pub fn ConversationPage() -> impl IntoView {
    let params = use_params_map();
    let ui = expect_context::<RwSignal<UiState>>();
    let conversation_id = Memo::new(move |_| params.with(|p| p.get("conversation_id")).unwrap_or_default());
    let inbox = RwSignal::new(InboxState::default());
    let has_more = RwSignal::new(false);

    let first_page = LocalResource::new(move || {
        let id = conversation_id.get();
        async move {
            let result = api::fetch_conversation_messages(&id, 0).await;
            (id, result)
        }
    });

    Effect::new(move || {
        let Some((id, result)) = first_page.get() else {
            inbox.update(|s| s.loading = true);
            return;
        };
        match result {
            Ok(messages) => {
                has_more.set(messages.len() >= MESSAGES_PAGE_SIZE);
                inbox.update(|s| s.load(&id, messages));
            }
            Err(e) => {
                log::warn!("messages query for {id} failed: {e}");
                inbox.update(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    });

    let load_older = move |_| {
        let Some(id) = inbox.with_untracked(|s| s.conversation_id.clone()) else {
            return;
        };
        let skip = inbox.with_untracked(|s| s.messages.len());
        inbox.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            match api::fetch_conversation_messages(&id, skip).await {
                Ok(messages) => {
                    has_more.set(messages.len() >= MESSAGES_PAGE_SIZE);
                    inbox.update(|s| {
                        s.loading = false;
                        s.append(messages);
                    });
                }
                Err(e) => {
                    inbox.update(|s| s.loading = false);
                    ui.update(|u| {
                        u.error(e.to_string());
                    });
                }
            }
        });
    };

    let messages = move || inbox.with(|s| s.messages.clone());

    view! {
        <section class="conversation">
            {move || {
                inbox
                    .with(|s| s.error.clone())
                    .map(|error| view! { <EmptyState text=error icon="alert" error=true/> })
            }}
            <Show when=move || inbox.with(|s| s.error.is_none() && !s.loading && s.messages.is_empty())>
                <EmptyState text="No messages" icon="chat"/>
            </Show>
            <div class="conversation__messages">
                <For each=messages key=|m| m.message.id.clone() children=|m| view! { <Message message=m/> }/>
            </div>
            <Show when=move || inbox.with(|s| s.loading)>
                <Spinner/>
            </Show>
            <Show when=move || has_more.get() && !inbox.with(|s| s.loading)>
                <button class="btn conversation__more" on:click=load_older>
                    "Load more"
                </button>
            </Show>
        </section>
    }
}
