//! Leptos bindings for the shared visibility tracker.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` establishes one scope (and one native observer) per subtree,
//! `hooks` hands components a `NodeRef` plus a visibility signal, and `dom`
//! adapts browser elements and `IntersectionObserver` to the core crate.

pub mod dom;
pub mod hooks;
pub mod provider;

pub use hooks::{
    ChangeHandler, InViewHandle, try_use_in_view, try_use_in_view_dynamic, use_in_view, use_in_view_dynamic,
};
pub use provider::{IntersectionObserverProvider, VisibilityScope, effective_options};
