use super::*;

fn message(id: &str) -> Message {
    Message {
        id: id.to_owned(),
        content: format!("content {id}"),
        user_id: None,
        customer_id: Some("cust-1".to_owned()),
        created_at: None,
        internal: false,
        attachments: Vec::new(),
        form_widget_data: None,
        facebook_data: None,
        twitter_data: None,
        messenger_app_data: None,
    }
}

// =============================================================
// classify
// =============================================================

#[test]
fn form_wins_over_facebook() {
    let mut msg = message("m1");
    msg.form_widget_data = Some(serde_json::json!([{ "_id": "f1", "text": "Email", "value": "a@b.test" }]));
    msg.facebook_data = Some(serde_json::json!({ "postId": "p1" }));
    match MessageKind::classify(&msg) {
        MessageKind::Form(form) => {
            assert_eq!(form.fields.len(), 1);
            assert_eq!(form.fields[0].text, "Email");
        }
        other => panic!("expected form, got {other:?}"),
    }
}

#[test]
fn facebook_wins_over_twitter_and_app() {
    let mut msg = message("m1");
    msg.facebook_data = Some(serde_json::json!({ "postId": "p1", "isPost": true, "likeCount": 4 }));
    msg.twitter_data = Some(serde_json::json!({ "id_str": "t1" }));
    msg.messenger_app_data = Some(serde_json::json!({}));
    assert_eq!(
        MessageKind::classify(&msg),
        MessageKind::Facebook(FacebookPayload {
            post_id: Some("p1".to_owned()),
            is_post: true,
            like_count: 4,
            ..FacebookPayload::default()
        })
    );
}

#[test]
fn twitter_wins_over_app() {
    let mut msg = message("m1");
    msg.twitter_data = Some(serde_json::json!({ "id_str": "t1", "retweet_count": 2 }));
    msg.messenger_app_data = Some(serde_json::json!({ "message": "hi" }));
    let MessageKind::Twitter(tweet) = MessageKind::classify(&msg) else {
        panic!("expected twitter");
    };
    assert_eq!(tweet.id_str.as_deref(), Some("t1"));
    assert_eq!(tweet.retweet_count, 2);
}

#[test]
fn app_payload_selected_when_alone() {
    let mut msg = message("m1");
    msg.messenger_app_data = Some(serde_json::json!({ "message": "installed" }));
    assert_eq!(MessageKind::classify(&msg).label(), "app");
}

#[test]
fn plain_message_from_staff_and_customer() {
    let mut staff = message("m1");
    staff.user_id = Some("u1".to_owned());
    assert_eq!(MessageKind::classify(&staff), MessageKind::Simple { is_staff: true });
    assert_eq!(MessageKind::classify(&message("m2")), MessageKind::Simple { is_staff: false });
}

#[test]
fn malformed_payload_keeps_priority() {
    let mut msg = message("m1");
    msg.facebook_data = Some(serde_json::json!("not an object"));
    msg.twitter_data = Some(serde_json::json!({ "id_str": "t1" }));
    assert_eq!(MessageKind::classify(&msg), MessageKind::Facebook(FacebookPayload::default()));
}

#[test]
fn form_object_shape_is_accepted() {
    let mut msg = message("m1");
    msg.form_widget_data = Some(serde_json::json!({ "fields": [{ "text": "Name", "value": "Ada" }] }));
    let MessageKind::Form(form) = MessageKind::classify(&msg) else {
        panic!("expected form");
    };
    assert_eq!(form.fields[0].value, serde_json::json!("Ada"));
}

// =============================================================
// ingest / grouping
// =============================================================

#[test]
fn ingest_groups_consecutive_messages_by_author() {
    let mut staff = message("m3");
    staff.user_id = Some("u1".to_owned());
    let list = ingest(vec![message("m1"), message("m2"), staff]);
    let grouping: Vec<bool> = list.iter().map(|m| m.is_same_user).collect();
    assert_eq!(grouping, vec![false, true, false]);
}

#[test]
fn ingest_never_groups_anonymous_messages() {
    let mut a = message("m1");
    a.customer_id = None;
    let mut b = message("m2");
    b.customer_id = None;
    let list = ingest(vec![a, b]);
    assert!(!list[1].is_same_user);
}

#[test]
fn load_and_append_deduplicate_by_id() {
    let mut state = InboxState::default();
    state.loading = true;
    state.load("c1", vec![message("m1"), message("m2")]);
    assert!(!state.loading);
    assert_eq!(state.conversation_id.as_deref(), Some("c1"));

    state.append(vec![message("m2"), message("m3")]);
    let ids: Vec<&str> = state.messages.iter().map(|m| m.message.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
    assert!(state.messages[2].is_same_user);
}
