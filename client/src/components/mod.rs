//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render deal, inbox and settings surfaces while reading/writing
//! shared state from Leptos context providers.

pub mod alert_bar;
pub mod data_importer;
pub mod deal_card;
pub mod empty_state;
pub mod main_action_bar;
pub mod message;
pub mod pipeline_board;
pub mod spinner;
pub mod stage_column;
