//! Visibility hooks for components inside an `IntersectionObserverProvider`.
//!
//! SYSTEM CONTEXT
//! ==============
//! A hook returns an [`InViewHandle`]: a `NodeRef` to put on the tracked
//! element and a reactive `visible` flag. The element is attached to the
//! scope whenever the `NodeRef` resolves and detached on unmount, so a
//! component can swap or remove its element freely.
//!
//! TRADE-OFFS
//! ==========
//! The `try_` variants return integration mistakes as values; the plain
//! variants panic with the same message, matching the usual Leptos
//! `expect_context` convention for required providers.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::rc::Rc;

use leptos::html::{Div, ElementType};
use leptos::prelude::*;
use visibility::{DynamicInView, InView, IntersectionEntry, VisibilityError};
use wasm_bindgen::JsCast;

use crate::observer::dom::{DomBackend, DomTarget};
use crate::observer::provider::VisibilityScope;

/// Side effect run on each visibility change, before `visible` updates.
pub type ChangeHandler = Rc<dyn Fn(bool, &IntersectionEntry<DomTarget>)>;

/// Element binding and visibility flag returned by the hooks.
///
/// `E` is the element type the `node_ref` goes on; any HTML element works.
pub struct InViewHandle<E: ElementType = Div>
where
    E::Output: 'static,
{
    pub node_ref: NodeRef<E>,
    pub visible: Signal<bool>,
}

impl<E: ElementType> Clone for InViewHandle<E>
where
    E::Output: 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ElementType> Copy for InViewHandle<E> where E::Output: 'static {}

/// Track the element bound to the returned `node_ref`.
///
/// `visible` starts at `initial` and follows the scope's intersection
/// events once the element is registered.
///
/// # Errors
///
/// Returns [`VisibilityError::MissingProvider`] outside a provider.
pub fn try_use_in_view<E>(initial: bool, on_change: Option<ChangeHandler>) -> Result<InViewHandle<E>, VisibilityError>
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    let scope = use_context::<VisibilityScope>().ok_or(VisibilityError::MissingProvider)?;
    let visible = RwSignal::new(initial);

    let mut view = InView::new(&scope.multiplexer(), initial).on_visibility(move |is_visible| {
        let _ = visible.try_set(is_visible);
    });
    if let Some(handler) = on_change {
        view = view.on_change(move |is_intersecting, entry| handler(is_intersecting, entry));
    }

    let node_ref = NodeRef::<E>::new();
    bind_element(node_ref, view);
    Ok(InViewHandle { node_ref, visible: Signal::derive(move || visible.get()) })
}

/// [`try_use_in_view`] for components that always live under a provider.
///
/// # Panics
///
/// Panics when no `IntersectionObserverProvider` encloses the caller.
pub fn use_in_view<E>(initial: bool, on_change: Option<ChangeHandler>) -> InViewHandle<E>
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    match try_use_in_view(initial, on_change) {
        Ok(handle) => handle,
        Err(err) => panic!("{err}"),
    }
}

/// Track an item whose height is remembered while it is out of view.
///
/// On exit the item's measured size is stored under the scope id and
/// `item_id`, and its height is pinned; on entry the pin is released. An
/// item with no remembered size reports `visible == true` regardless of
/// intersection. `initial` forces the first report to visible.
///
/// # Errors
///
/// Returns [`VisibilityError::MissingProvider`] outside a provider and
/// [`VisibilityError::MissingScope`] when the provider has no id.
pub fn try_use_in_view_dynamic<E>(initial: bool, item_id: impl Into<String>) -> Result<InViewHandle<E>, VisibilityError>
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    let scope = use_context::<VisibilityScope>().ok_or(VisibilityError::MissingProvider)?;
    let view = DynamicInView::new(&scope.multiplexer(), item_id, initial)?;

    let live = RwSignal::new(view.is_intersecting());
    let has_cached = view.bounds().has_cached_size();
    let view = view.on_visibility(move |is_intersecting| {
        let _ = live.try_set(is_intersecting);
    });

    let node_ref = NodeRef::<E>::new();
    bind_element(node_ref, view);
    Ok(InViewHandle { node_ref, visible: Signal::derive(move || !has_cached || live.get()) })
}

/// [`try_use_in_view_dynamic`] for components under a provider with an id.
///
/// # Panics
///
/// Panics on either integration mistake described there.
pub fn use_in_view_dynamic<E>(initial: bool, item_id: impl Into<String>) -> InViewHandle<E>
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    match try_use_in_view_dynamic(initial, item_id) {
        Ok(handle) => handle,
        Err(err) => panic!("{err}"),
    }
}

trait Attachable {
    fn attach(&self, target: DomTarget);
    fn detach(&self);
}

impl Attachable for InView<DomBackend> {
    fn attach(&self, target: DomTarget) {
        InView::attach(self, target);
    }

    fn detach(&self) {
        InView::detach(self);
    }
}

impl Attachable for DynamicInView<DomBackend> {
    fn attach(&self, target: DomTarget) {
        DynamicInView::attach(self, target);
    }

    fn detach(&self) {
        DynamicInView::detach(self);
    }
}

/// Follow `node_ref` for the lifetime of the current owner.
fn bind_element<E, V>(node_ref: NodeRef<E>, view: V)
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
    V: Attachable + 'static,
{
    let view = StoredValue::new_local(view);
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let element = node_ref.get();
        view.with_value(|view| match element.and_then(DomTarget::from_element) {
            Some(target) => view.attach(target),
            None => view.detach(),
        });
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = node_ref;
    on_cleanup(move || {
        view.try_with_value(Attachable::detach);
    });
}
