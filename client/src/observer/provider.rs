//! Scope-establishing wrapper for visibility tracking.
//!
//! DESIGN
//! ======
//! Each `IntersectionObserverProvider` owns one [`Multiplexer`] and publishes
//! it to its subtree as a [`VisibilityScope`] context value. The native
//! observer is created in an effect, after mount, so an enclosing
//! `ScrollArea` has attached its container and can serve as the root.
//! Children mounted before that point wait on the scope's readiness.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use leptos::prelude::*;
use visibility::{Multiplexer, ScopeOptions};

#[cfg(feature = "hydrate")]
use crate::components::scroll_area::ScrollAreaContext;
use crate::observer::dom::DomBackend;

/// Handle to the nearest provider scope, read from context by the hooks.
#[derive(Clone)]
pub struct VisibilityScope {
    id: Option<String>,
    hub: StoredValue<Multiplexer<DomBackend>, LocalStorage>,
}

impl VisibilityScope {
    /// Create a pending scope owned by the current reactive owner.
    pub fn new(id: Option<String>, options: ScopeOptions) -> Self {
        let id = id.filter(|id| !id.is_empty());
        Self {
            hub: StoredValue::new_local(Multiplexer::new(id.clone(), options)),
            id,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn multiplexer(&self) -> Multiplexer<DomBackend> {
        self.hub.get_value()
    }

    fn teardown(&self) {
        self.hub.try_with_value(Multiplexer::teardown);
    }
}

/// Options the scope will actually use: the overrides when they validate,
/// otherwise the defaults.
pub fn effective_options(options: Option<ScopeOptions>) -> ScopeOptions {
    match options {
        Some(options) => match options.validate() {
            Ok(()) => options,
            Err(err) => {
                #[cfg(feature = "hydrate")]
                log::warn!("ignoring visibility scope options: {err}");
                #[cfg(not(feature = "hydrate"))]
                let _ = err;
                ScopeOptions::default()
            }
        },
        None => ScopeOptions::default(),
    }
}

/// Establishes one visibility scope for its children.
///
/// `id` names the scope; dynamic-bounds hooks require it. `options`
/// overrides the prefetch margin, thresholds or axis.
#[component]
pub fn IntersectionObserverProvider(
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] options: Option<ScopeOptions>,
    children: Children,
) -> impl IntoView {
    let scope = VisibilityScope::new(id, effective_options(options));

    #[cfg(feature = "hydrate")]
    {
        let scroll_area = use_context::<ScrollAreaContext>();
        let scope = scope.clone();
        Effect::new(move || {
            // Wait for the scroll container when there is one; otherwise the
            // viewport is the root.
            let root: Option<web_sys::Element> = match scroll_area {
                Some(area) => match area.node_ref.get() {
                    Some(container) => Some(container.into()),
                    None => return,
                },
                None => None,
            };
            connect(&scope, root.as_ref());
        });
    }

    {
        let scope = scope.clone();
        on_cleanup(move || scope.teardown());
    }

    provide_context(scope);
    children()
}

#[cfg(feature = "hydrate")]
fn connect(scope: &VisibilityScope, root: Option<&web_sys::Element>) {
    let multiplexer = scope.multiplexer();
    if multiplexer.phase() != visibility::Phase::Pending {
        return;
    }
    let backend = match DomBackend::connect(&multiplexer, root) {
        Ok(backend) => backend,
        Err(err) => {
            log::warn!("visibility scope {:?}: IntersectionObserver unavailable: {err:?}", scope.id());
            return;
        }
    };
    if let Err(err) = multiplexer.install(backend) {
        log::warn!("visibility scope {:?}: {err}", scope.id());
    }
}
