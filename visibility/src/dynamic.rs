//! Visibility for items whose height is only known after layout.
//!
//! When such an item leaves the viewport its rendered size is remembered in
//! [`size_memory`](crate::size_memory) and its height is pinned inline, so the
//! caller can drop the heavy content without shifting the rest of the list.
//! Entering the viewport again releases the pin.
//!
//! The size lookup happens once, when the hook is created. An item that had
//! no remembered size at that point reports itself visible for the lifetime
//! of the hook, since there is nothing to collapse it to.

#[cfg(test)]
#[path = "dynamic_test.rs"]
mod dynamic_test;

use std::rc::Rc;

use crate::entry::{IntersectionEntry, Rect};
use crate::error::VisibilityError;
use crate::in_view::InView;
use crate::multiplexer::{Multiplexer, ObservationBackend};
use crate::size_memory::{self, SizeEntry, SizeKey};

/// Element that can be measured and have its height pinned.
pub trait MeasuredTarget {
    /// Current rendered box.
    fn measure(&self) -> Rect;
    /// Force the element's height to `height` CSS pixels.
    fn pin_height(&self, height: f64);
    /// Remove a forced height, letting content size the element.
    fn release_height(&self);
}

/// Size bookkeeping for one logical item in one scope.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicBounds {
    key: SizeKey,
    cached: Option<SizeEntry>,
}

impl DynamicBounds {
    /// Resolve the item's key and read its remembered size.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError::MissingScope`] when `scope_id` is absent or
    /// empty; sizes are only meaningful per scope.
    pub fn new(scope_id: Option<&str>, item_id: impl Into<String>) -> Result<Self, VisibilityError> {
        let item_id = item_id.into();
        let Some(scope_id) = scope_id.filter(|id| !id.is_empty()) else {
            return Err(VisibilityError::MissingScope { item: item_id });
        };
        let key = SizeKey::new(scope_id, item_id);
        let cached = size_memory::lookup(&key);
        Ok(Self { key, cached })
    }

    #[must_use]
    pub fn key(&self) -> &SizeKey {
        &self.key
    }

    /// Size remembered when this hook was created.
    #[must_use]
    pub fn cached(&self) -> Option<SizeEntry> {
        self.cached
    }

    #[must_use]
    pub fn has_cached_size(&self) -> bool {
        self.cached.is_some()
    }

    /// First visibility guess: visible unless a size is known, or when forced.
    #[must_use]
    pub fn initial_visibility(&self, force_visible: bool) -> bool {
        force_visible || self.cached.is_none()
    }

    /// Visibility reported to the caller given the live flag.
    #[must_use]
    pub fn reported(&self, live: bool) -> bool {
        self.cached.is_none() || live
    }

    /// Pin on exit, release on entry.
    ///
    /// A zero height on exit means the element has not rendered yet; nothing
    /// is recorded or pinned in that case.
    pub fn handle_transition<T: MeasuredTarget>(&self, is_intersecting: bool, target: &T) {
        if is_intersecting {
            target.release_height();
            return;
        }
        let rect = target.measure();
        if rect.height > 0.0 && size_memory::record(self.key.clone(), SizeEntry { width: rect.width, height: rect.height }) {
            target.pin_height(rect.height);
        }
    }
}

/// [`InView`] plus [`DynamicBounds`] for one item.
pub struct DynamicInView<B: ObservationBackend> {
    bounds: Rc<DynamicBounds>,
    view: InView<B>,
}

impl<B> DynamicInView<B>
where
    B: ObservationBackend,
    B::Target: MeasuredTarget,
{
    /// Track `item_id` in `scope`. `force_visible` overrides the initial guess.
    ///
    /// # Errors
    ///
    /// Returns [`VisibilityError::MissingScope`] when the scope has no id.
    pub fn new(scope: &Multiplexer<B>, item_id: impl Into<String>, force_visible: bool) -> Result<Self, VisibilityError> {
        let bounds = Rc::new(DynamicBounds::new(scope.scope_id().as_deref(), item_id)?);
        let handler = Rc::clone(&bounds);
        let view = InView::new(scope, bounds.initial_visibility(force_visible)).on_change(
            move |is_intersecting, entry: &IntersectionEntry<B::Target>| {
                handler.handle_transition(is_intersecting, &entry.target);
            },
        );
        Ok(Self { bounds, view })
    }

    /// Publisher for the live flag; see [`InView::on_visibility`].
    #[must_use]
    pub fn on_visibility(self, publish: impl Fn(bool) + 'static) -> Self {
        Self { bounds: self.bounds, view: self.view.on_visibility(publish) }
    }

    #[must_use]
    pub fn bounds(&self) -> &DynamicBounds {
        &self.bounds
    }

    /// Visibility as reported to the caller.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.bounds.reported(self.view.is_visible())
    }

    /// Live flag of the underlying [`InView`], ignoring the size fallback.
    #[must_use]
    pub fn is_intersecting(&self) -> bool {
        self.view.is_visible()
    }

    pub fn attach(&self, target: B::Target) {
        self.view.attach(target);
    }

    pub fn detach(&self) {
        self.view.detach();
    }
}
