//! # salesdesk-client
//!
//! Leptos + WASM frontend for the SalesDesk CRM: deal pipelines with
//! drag-and-drop, the deal filter bar, the inbox message list, and the
//! spreadsheet import screen.
//!
//! This crate contains pages, components, application state, the GraphQL
//! query layer, and browser helpers. The `server` crate renders [`app::App`]
//! with the `ssr` feature; the browser bundle is built with `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Errs only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
