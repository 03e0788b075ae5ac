//! Shared visibility tracking for scrollable feeds.
//!
//! Many UI elements want to know whether they are inside (or near) the
//! visible part of a scroll container. This crate lets them share exactly one
//! underlying observation mechanism per scope, dispatching batched
//! intersection changes to per-element callbacks. Items whose height is only
//! known after layout can additionally pin their last measured height while
//! off screen so surrounding content does not reflow.
//!
//! The crate is framework-agnostic. The browser `IntersectionObserver` and the
//! Leptos bindings live in the `client` crate; everything here runs natively
//! and is exercised with a fake backend in tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`multiplexer`] | One observation backend per scope, element-to-callback records, dispatch |
//! | [`in_view`] | Per-element subscription with readiness deferral |
//! | [`dynamic`] | Height pinning for dynamic-size items on top of [`in_view`] |
//! | [`size_memory`] | Process-wide last-known size per `(scope, item)` |
//! | [`options`] | Scope configuration (prefetch margin, thresholds, axis) |
//! | [`entry`] | Intersection change records and rectangles |
//! | [`error`] | Configuration and scope lifecycle errors |
//! | [`consts`] | Shared defaults |

pub mod consts;
pub mod dynamic;
pub mod entry;
pub mod error;
pub mod in_view;
pub mod multiplexer;
pub mod options;
pub mod size_memory;

#[cfg(test)]
pub(crate) mod testing;

pub use dynamic::{DynamicBounds, DynamicInView, MeasuredTarget};
pub use entry::{IntersectionEntry, Rect};
pub use error::{ScopeError, VisibilityError};
pub use in_view::InView;
pub use multiplexer::{Multiplexer, ObservationBackend, Phase, WeakMultiplexer};
pub use options::{Axis, ScopeOptions};
pub use size_memory::{SizeEntry, SizeKey, SizeMemory};
