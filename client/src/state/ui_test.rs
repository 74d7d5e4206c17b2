use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn new_state_has_no_alerts_and_hidden_filter() {
    let state = UiState::new();
    assert!(state.alerts.is_empty());
    assert!(state.filter_hidden);
}

#[test]
fn toggle_filter_flips_visibility() {
    let mut state = UiState::new();
    state.toggle_filter();
    assert!(!state.filter_hidden);
    state.toggle_filter();
    assert!(state.filter_hidden);
}

// =============================================================
// Alerts
// =============================================================

#[test]
fn push_alert_assigns_increasing_ids() {
    let mut state = UiState::new();
    let a = state.push_alert(AlertKind::Info, "one");
    let b = state.error("two");
    assert!(b > a);
    assert_eq!(state.alerts[1].kind, AlertKind::Error);
    assert_eq!(state.alerts[1].message, "two");
}

#[test]
fn dismiss_removes_only_matching_alert() {
    let mut state = UiState::new();
    let a = state.error("one");
    let b = state.error("two");
    state.dismiss(a);
    assert_eq!(state.alerts.len(), 1);
    assert_eq!(state.alerts[0].id, b);
    state.dismiss(999);
    assert_eq!(state.alerts.len(), 1);
}

#[test]
fn oldest_alerts_are_dropped_past_limit() {
    let mut state = UiState::new();
    for i in 0..(MAX_ALERTS + 2) {
        state.push_alert(AlertKind::Success, format!("alert {i}"));
    }
    assert_eq!(state.alerts.len(), MAX_ALERTS);
    assert_eq!(state.alerts[0].message, "alert 2");
}

#[test]
fn alert_kind_classes_are_distinct() {
    assert_ne!(AlertKind::Info.class(), AlertKind::Error.class());
    assert_eq!(AlertKind::Success.class(), "alert--success");
}
