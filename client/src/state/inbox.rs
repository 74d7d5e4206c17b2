//! Conversation message list state for the inbox work area.
//!
//! DESIGN
//! ======
//! A raw [`Message`] can carry several optional channel payloads at once.
//! [`MessageKind::classify`] resolves them exactly once, when messages are
//! ingested, with a fixed priority: form, Facebook, Twitter, messenger app,
//! then plain. Renderers match on the enum and never re-inspect the payloads.

#[cfg(test)]
#[path = "inbox_test.rs"]
mod inbox_test;

use serde::Deserialize;

use crate::net::types::Message;

/// One answered field of a form widget submission.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FormFieldAnswer {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub fields: Vec<FormFieldAnswer>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPayload {
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(default)]
    pub is_post: bool,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TwitterPayload {
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPayload {
    #[serde(default)]
    pub customer: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Resolved rendering variant of a message.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageKind {
    Form(FormSubmission),
    Facebook(FacebookPayload),
    Twitter(TwitterPayload),
    App(AppPayload),
    Simple { is_staff: bool },
}

impl MessageKind {
    /// Pick the variant for `message` using the fixed payload priority.
    ///
    /// A payload that is present but malformed still selects its variant
    /// (with default fields) so the priority order never depends on payload
    /// validity.
    #[must_use]
    pub fn classify(message: &Message) -> Self {
        if let Some(raw) = &message.form_widget_data {
            return Self::Form(parse_form(raw));
        }
        if let Some(raw) = &message.facebook_data {
            return Self::Facebook(parse_or_default(raw, "facebookData"));
        }
        if let Some(raw) = &message.twitter_data {
            return Self::Twitter(parse_or_default(raw, "twitterData"));
        }
        if let Some(raw) = &message.messenger_app_data {
            return Self::App(parse_or_default(raw, "messengerAppData"));
        }
        Self::Simple { is_staff: message.user_id.is_some() }
    }

    /// Short label used for CSS modifiers and accessibility text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Form(_) => "form",
            Self::Facebook(_) => "facebook",
            Self::Twitter(_) => "twitter",
            Self::App(_) => "app",
            Self::Simple { .. } => "simple",
        }
    }
}

/// A message with its variant resolved at ingestion.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversationMessage {
    pub message: Message,
    pub kind: MessageKind,
    /// Sent by the same author as the previous message.
    pub is_same_user: bool,
}

/// Messages of the open conversation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InboxState {
    pub conversation_id: Option<String>,
    pub messages: Vec<ConversationMessage>,
    pub loading: bool,
    pub error: Option<String>,
}

impl InboxState {
    /// Replace the message list for `conversation_id`.
    pub fn load(&mut self, conversation_id: &str, messages: Vec<Message>) {
        self.conversation_id = Some(conversation_id.to_owned());
        self.messages = ingest(messages);
        self.loading = false;
        self.error = None;
    }

    /// Append older/newer pages, keeping grouping consistent across the seam.
    pub fn append(&mut self, messages: Vec<Message>) {
        let mut raw: Vec<Message> = self.messages.drain(..).map(|m| m.message).collect();
        for message in messages {
            if !raw.iter().any(|existing| existing.id == message.id) {
                raw.push(message);
            }
        }
        self.messages = ingest(raw);
    }
}

/// Classify messages and compute same-author grouping.
#[must_use]
pub fn ingest(messages: Vec<Message>) -> Vec<ConversationMessage> {
    let mut out: Vec<ConversationMessage> = Vec::with_capacity(messages.len());
    for message in messages {
        let is_same_user = out
            .last()
            .is_some_and(|prev| author_key(&prev.message).is_some() && author_key(&prev.message) == author_key(&message));
        out.push(ConversationMessage { kind: MessageKind::classify(&message), message, is_same_user });
    }
    out
}

/// Staff messages are keyed by user, customer messages by customer.
fn author_key(message: &Message) -> Option<(&'static str, &str)> {
    if let Some(user_id) = &message.user_id {
        return Some(("user", user_id.as_str()));
    }
    message.customer_id.as_deref().map(|id| ("customer", id))
}

fn parse_form(raw: &serde_json::Value) -> FormSubmission {
    // Older widgets send a bare array of answers.
    if raw.is_array() {
        return FormSubmission { fields: parse_or_default(raw, "formWidgetData") };
    }
    parse_or_default(raw, "formWidgetData")
}

fn parse_or_default<T: Default + serde::de::DeserializeOwned>(raw: &serde_json::Value, field: &str) -> T {
    serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
        log::warn!("malformed {field}: {e}");
        T::default()
    })
}
