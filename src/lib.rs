//! # digibuddy-client
//!
//! Leptos + WASM frontend for the DigiBuddy companion chat.
//!
//! The crate keeps the session and conversation logic in plain Rust under
//! [`state`] so it can be tested natively, and binds it to the browser in
//! [`pages`] and [`components`]. Browser-only calls (storage, HTTP, timers)
//! are compiled in with the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
