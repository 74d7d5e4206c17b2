//! Conversation message renderer.
//!
//! DESIGN
//! ======
//! The variant is already resolved on [`ConversationMessage::kind`]; this
//! component only matches on it. Each arm is a small private renderer.

use leptos::prelude::*;

use crate::net::types::Attachment;
use crate::state::inbox::{
    AppPayload, ConversationMessage, FacebookPayload, FormSubmission, MessageKind, TwitterPayload,
};
use crate::util::format::format_close_date;

#[component]
pub fn Message(message: ConversationMessage) -> impl IntoView {
    let ConversationMessage { message, kind, is_same_user } = message;
    let date = message.created_at.as_deref().and_then(format_close_date);
    let class = format!("message message--{}", kind.label());
    let internal = message.internal;
    let attachments = message.attachments;

    let body = match kind {
        MessageKind::Form(form) => render_form(form).into_any(),
        MessageKind::Facebook(post) => render_facebook(post, message.content).into_any(),
        MessageKind::Twitter(tweet) => render_twitter(tweet, message.content).into_any(),
        MessageKind::App(app) => render_app(app).into_any(),
        MessageKind::Simple { is_staff } => render_simple(is_staff, message.content).into_any(),
    };

    view! {
        <div class=class class:message--same-user=is_same_user class:message--internal=internal>
            {body}
            {render_attachments(attachments)}
            {(!is_same_user).then(|| date.map(|d| view! { <time class="message__date">{d}</time> }))}
        </div>
    }
}

fn render_simple(is_staff: bool, content: String) -> impl IntoView {
    view! {
        <div class="message__bubble" class:message__bubble--staff=is_staff>
            <p class="message__content">{content}</p>
        </div>
    }
}

fn render_form(form: FormSubmission) -> impl IntoView {
    view! {
        <dl class="message__form">
            {form
                .fields
                .into_iter()
                .map(|field| {
                    let value = match field.value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    view! {
                        <dt>{field.text}</dt>
                        <dd>{value}</dd>
                    }
                })
                .collect_view()}
        </dl>
    }
}

fn render_facebook(post: FacebookPayload, content: String) -> impl IntoView {
    let heading = if post.is_post { "Facebook post" } else { "Facebook comment" };
    view! {
        <div class="message__social message__social--facebook">
            <header class="message__social-head">
                <span>{heading}</span>
                {post.sender_name.map(|name| view! { <strong>{name}</strong> })}
            </header>
            <p class="message__content">{content}</p>
            <footer class="message__social-stats">
                {format!("{} likes · {} comments", post.like_count, post.comment_count)}
            </footer>
        </div>
    }
}

fn render_twitter(tweet: TwitterPayload, content: String) -> impl IntoView {
    view! {
        <div class="message__social message__social--twitter">
            {tweet.in_reply_to_screen_name.map(|name| view! { <span class="message__reply-to">{format!("@{name}")}</span> })}
            <p class="message__content">{content}</p>
            <footer class="message__social-stats">
                {format!("{} retweets · {} likes", tweet.retweet_count, tweet.favorite_count)}
            </footer>
        </div>
    }
}

fn render_app(app: AppPayload) -> impl IntoView {
    view! {
        <div class="message__app">
            <p class="message__content">{app.message.unwrap_or_else(|| "Messenger app event".to_owned())}</p>
        </div>
    }
}

fn render_attachments(attachments: Vec<Attachment>) -> impl IntoView {
    (!attachments.is_empty()).then(|| {
        view! {
            <ul class="message__attachments">
                {attachments
                    .into_iter()
                    .map(|a| {
                        let label = a.name.clone().unwrap_or_else(|| a.url.clone());
                        view! {
                            <li>
                                <a href=a.url target="_blank" rel="noopener">{label}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
    })
}
