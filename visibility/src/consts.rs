//! Shared defaults for the visibility crate.

// ── Observation ─────────────────────────────────────────────────

/// How far past the visible viewport, in percent of the root's size, an
/// element already counts as visible along the scroll axis.
pub const DEFAULT_PREFETCH_MARGIN_PERCENT: f64 = 200.0;

/// Intersection ratio at which the backend reports a change.
pub const DEFAULT_THRESHOLD: f64 = 0.0;

// ── Styling ─────────────────────────────────────────────────────

/// Inline style property pinned on off-screen dynamic items.
pub const PINNED_STYLE_PROPERTY: &str = "height";
