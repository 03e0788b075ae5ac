//! # client
//!
//! Leptos + WASM frontend for the Galleria feed.
//!
//! `observer` binds the `visibility` crate to the browser: a provider
//! component per scope, `use_in_view` hooks, and the `IntersectionObserver`
//! backend. `pages` and `components` build the gallery feed on top of it.

pub mod app;
pub mod components;
pub mod observer;
pub mod pages;
pub mod state;

/// Browser entry point: installs logging, then hydrates the server render.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
