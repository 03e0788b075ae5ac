//! Intersection change records delivered by an observation backend.

/// Axis-aligned rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size anchored at the origin.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }
}

/// One change reported for one observed target.
///
/// Mirrors the fields of a browser `IntersectionObserverEntry` that callers
/// actually consume; `target` is the backend's own element handle.
#[derive(Clone, Debug)]
pub struct IntersectionEntry<T> {
    /// Element the change was reported for.
    pub target: T,
    /// Whether the target now intersects the (margin-expanded) root.
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub intersection_ratio: f64,
    /// Target bounds at the time of the change.
    pub bounding_rect: Rect,
    /// Timestamp in milliseconds as reported by the backend.
    pub time: f64,
}

impl<T> IntersectionEntry<T> {
    /// Entry with only the intersection flag set; ratio follows the flag.
    #[must_use]
    pub fn new(target: T, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
            bounding_rect: Rect::default(),
            time: 0.0,
        }
    }
}
