//! Local UI chrome state: alert queue and the deal filter panel.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`pipeline`,
//! `import`) so notification and panel controls can evolve independently of
//! API data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Maximum number of alerts kept on screen.
pub const MAX_ALERTS: usize = 4;

/// Severity of a user-visible alert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Info,
    Success,
    Error,
}

impl AlertKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "alert--info",
            Self::Success => "alert--success",
            Self::Error => "alert--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

/// UI state for alerts and panel toggles.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub alerts: Vec<Alert>,
    pub next_alert_id: u64,
    /// Whether the deal filter box is collapsed.
    pub filter_hidden: bool,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self { filter_hidden: true, ..Self::default() }
    }

    /// Queue an alert and return its id. The oldest alert is dropped once
    /// more than [`MAX_ALERTS`] are queued.
    pub fn push_alert(&mut self, kind: AlertKind, message: impl Into<String>) -> u64 {
        let id = self.next_alert_id;
        self.next_alert_id += 1;
        self.alerts.push(Alert { id, kind, message: message.into() });
        if self.alerts.len() > MAX_ALERTS {
            let overflow = self.alerts.len() - MAX_ALERTS;
            self.alerts.drain(..overflow);
        }
        id
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push_alert(AlertKind::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.alerts.retain(|a| a.id != id);
    }

    pub fn toggle_filter(&mut self) {
        self.filter_hidden = !self.filter_hidden;
    }
}
