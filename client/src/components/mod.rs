//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the gallery feed and consume visibility scopes from the
//! nearest `IntersectionObserverProvider`.

pub mod gallery_card;
pub mod load_more;
pub mod scroll_area;
