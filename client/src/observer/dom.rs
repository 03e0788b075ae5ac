//! Browser `IntersectionObserver` backend and measurable DOM targets.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`DomBackend`] wraps the single native observer of a provider scope.
//! Its JS callback converts native entries into [`IntersectionEntry`] values
//! and hands the batch to the scope's multiplexer through a weak handle, so
//! the observer never keeps its own scope alive.
//!
//! Element identity comes from a JS `Map` keyed by the element object itself;
//! Rust-side wrappers of the same node compare equal there even when they are
//! distinct `HtmlElement` values.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use js_sys::{Array, Map};
use visibility::consts::PINNED_STYLE_PROPERTY;
use visibility::{IntersectionEntry, MeasuredTarget, Multiplexer, ObservationBackend, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// CSS length for a pinned height.
#[must_use]
pub fn height_css(height: f64) -> String {
    format!("{height}px")
}

/// Element tracked by a provider scope.
#[derive(Clone, Debug, PartialEq)]
pub struct DomTarget(pub HtmlElement);

impl DomTarget {
    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }

    /// Wrap any HTML element; `None` for non-HTML nodes such as SVG.
    pub fn from_element(element: impl JsCast) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    fn identity(&self) -> &JsValue {
        self.0.as_ref()
    }
}

impl MeasuredTarget for DomTarget {
    fn measure(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn pin_height(&self, height: f64) {
        let _ = self.0.style().set_property(PINNED_STYLE_PROPERTY, &height_css(height));
    }

    fn release_height(&self) {
        let _ = self.0.style().remove_property(PINNED_STYLE_PROPERTY);
    }
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// The native observer of one provider scope.
pub struct DomBackend {
    observer: IntersectionObserver,
    ids: Map,
    next_id: u32,
    _callback: EntriesCallback,
}

impl DomBackend {
    /// Build the native observer for `scope`, rooted at `root` (the browser
    /// viewport when `None`) with the scope's margin and thresholds.
    ///
    /// # Errors
    ///
    /// Returns the JS exception when the browser rejects the observer, e.g.
    /// for a malformed root margin.
    pub fn connect(scope: &Multiplexer<DomBackend>, root: Option<&Element>) -> Result<Self, JsValue> {
        let options = scope.options();
        let weak = scope.downgrade();
        let callback: EntriesCallback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let Some(scope) = weak.upgrade() else {
                return;
            };
            scope.dispatch(
                entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| convert_entry(&entry)),
            );
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root(root);
        init.set_root_margin(&options.root_margin());
        let thresholds = options
            .thresholds
            .iter()
            .map(|threshold| JsValue::from_f64(*threshold))
            .collect::<Array>();
        init.set_threshold(&thresholds);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self { observer, ids: Map::new(), next_id: 0, _callback: callback })
    }
}

impl ObservationBackend for DomBackend {
    type Target = DomTarget;
    type Key = u32;

    fn observe(&mut self, target: &DomTarget) -> u32 {
        let key = self.key_of(target).unwrap_or_else(|| {
            self.next_id = self.next_id.wrapping_add(1);
            self.ids.set(target.identity(), &JsValue::from(self.next_id));
            self.next_id
        });
        self.observer.observe(target.element());
        key
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn key_of(&self, target: &DomTarget) -> Option<u32> {
        self.ids.get(target.identity()).as_f64().map(|id| id as u32)
    }

    fn unobserve(&mut self, target: &DomTarget) {
        if self.ids.delete(target.identity()) {
            self.observer.unobserve(target.element());
        }
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
        self.ids.clear();
    }
}

impl Drop for DomBackend {
    // The JS observer must stop before its callback closure is freed.
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn convert_entry(entry: &IntersectionObserverEntry) -> Option<IntersectionEntry<DomTarget>> {
    let target = entry.target().dyn_into::<HtmlElement>().ok()?;
    let bounds = entry.bounding_client_rect();
    Some(IntersectionEntry {
        target: DomTarget(target),
        is_intersecting: entry.is_intersecting(),
        intersection_ratio: entry.intersection_ratio(),
        bounding_rect: Rect::new(bounds.x(), bounds.y(), bounds.width(), bounds.height()),
        time: entry.time(),
    })
}
