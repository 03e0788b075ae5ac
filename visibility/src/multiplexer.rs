//! One observation backend per scope, shared by every tracked element.
//!
//! ARCHITECTURE
//! ============
//! A [`Multiplexer`] owns the scope's single [`ObservationBackend`] and a map
//! from target identity to callback. The backend reports batches of
//! [`IntersectionEntry`] values; [`Multiplexer::dispatch`] routes each entry
//! to the callback registered for its target at that moment.
//!
//! LIFECYCLE
//! =========
//! `Pending` until [`Multiplexer::install`] hands over a backend, then
//! `Ready`, then `TornDown`. The backend is built late (after the host tree
//! has attached its scroll container), so registrations made while pending
//! are refused and callers wait through [`Multiplexer::on_ready`]. Readiness
//! flips at most once per scope.
//!
//! No `RefCell` borrow is held while user callbacks run: callbacks may
//! observe, unobserve or tear down re-entrantly.

#[cfg(test)]
#[path = "multiplexer_test.rs"]
mod multiplexer_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use crate::entry::IntersectionEntry;
use crate::error::ScopeError;
use crate::options::ScopeOptions;

/// The underlying observation mechanism of one scope.
///
/// Implementations watch targets and assign each a stable identity key; the
/// multiplexer never inspects targets beyond asking for that key.
pub trait ObservationBackend: 'static {
    /// Element handle the mechanism watches.
    type Target: Clone + 'static;
    /// Identity of a watched target.
    type Key: Copy + Eq + Hash + Debug + 'static;

    /// Start watching `target` and return its identity.
    fn observe(&mut self, target: &Self::Target) -> Self::Key;

    /// Identity of `target` if it is currently watched.
    fn key_of(&self, target: &Self::Target) -> Option<Self::Key>;

    /// Stop watching `target`. Must tolerate unknown targets.
    fn unobserve(&mut self, target: &Self::Target);

    /// Stop watching everything and release the mechanism.
    fn disconnect(&mut self);
}

/// Callback invoked with `(is_intersecting, entry)` for one target.
pub type Callback<T> = Rc<dyn Fn(bool, &IntersectionEntry<T>)>;

/// Scope lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Backend not constructed yet; registrations are refused.
    #[default]
    Pending,
    /// Backend live; registrations are honored.
    Ready,
    /// Scope unmounted; every call is a no-op.
    TornDown,
}

struct Hub<B: ObservationBackend> {
    scope_id: Option<String>,
    options: ScopeOptions,
    phase: Phase,
    backend: Option<B>,
    records: HashMap<B::Key, Callback<B::Target>>,
    waiters: Vec<Box<dyn FnOnce()>>,
}

/// Shared handle to a scope's observer. Clones refer to the same scope.
pub struct Multiplexer<B: ObservationBackend> {
    hub: Rc<RefCell<Hub<B>>>,
}

impl<B: ObservationBackend> Clone for Multiplexer<B> {
    fn clone(&self) -> Self {
        Self { hub: Rc::clone(&self.hub) }
    }
}

impl<B: ObservationBackend> Multiplexer<B> {
    /// Create a pending scope. Empty scope ids count as absent.
    #[must_use]
    pub fn new(scope_id: Option<String>, options: ScopeOptions) -> Self {
        let scope_id = scope_id.filter(|id| !id.is_empty());
        Self {
            hub: Rc::new(RefCell::new(Hub {
                scope_id,
                options,
                phase: Phase::Pending,
                backend: None,
                records: HashMap::new(),
                waiters: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn scope_id(&self) -> Option<String> {
        self.hub.borrow().scope_id.clone()
    }

    #[must_use]
    pub fn options(&self) -> ScopeOptions {
        self.hub.borrow().options.clone()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.hub.borrow().phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Number of live observation records.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.hub.borrow().records.len()
    }

    /// Whether `target` currently has an observation record.
    #[must_use]
    pub fn is_observing(&self, target: &B::Target) -> bool {
        let hub = self.hub.borrow();
        hub.backend
            .as_ref()
            .and_then(|backend| backend.key_of(target))
            .is_some_and(|key| hub.records.contains_key(&key))
    }

    /// Non-owning handle, for backends whose event source must reach the
    /// scope without keeping it alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakMultiplexer<B> {
        WeakMultiplexer { hub: Rc::downgrade(&self.hub) }
    }

    /// Hand the scope its backend and mark it ready.
    ///
    /// Readiness waiters run once, after the scope is ready, in the order
    /// they were queued.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::AlreadyReady`] if a backend was installed before
    /// and [`ScopeError::TornDown`] after teardown. The rejected backend is
    /// disconnected.
    pub fn install(&self, mut backend: B) -> Result<(), ScopeError> {
        let waiters = {
            let hub = &mut *self.hub.borrow_mut();
            match hub.phase {
                Phase::Pending => {}
                Phase::Ready => {
                    backend.disconnect();
                    return Err(ScopeError::AlreadyReady);
                }
                Phase::TornDown => {
                    backend.disconnect();
                    return Err(ScopeError::TornDown);
                }
            }
            hub.backend = Some(backend);
            hub.phase = Phase::Ready;
            std::mem::take(&mut hub.waiters)
        };
        log::debug!("visibility scope {:?} ready ({} waiting)", self.scope_id(), waiters.len());
        for waiter in waiters {
            waiter();
        }
        Ok(())
    }

    /// Run `waiter` once the scope is ready.
    ///
    /// Runs immediately when already ready; dropped without running if the
    /// scope is torn down first.
    pub fn on_ready(&self, waiter: impl FnOnce() + 'static) {
        let ready = {
            let mut hub = self.hub.borrow_mut();
            match hub.phase {
                Phase::Pending => {
                    hub.waiters.push(Box::new(waiter));
                    return;
                }
                Phase::Ready => true,
                Phase::TornDown => false,
            }
        };
        if ready {
            waiter();
        }
    }

    /// Register `callback` for `target` and start watching it.
    ///
    /// Returns `false` without registering while the scope is pending or
    /// after teardown. A second registration for the same target replaces
    /// its callback.
    pub fn observe(&self, target: &B::Target, callback: impl Fn(bool, &IntersectionEntry<B::Target>) + 'static) -> bool {
        let hub = &mut *self.hub.borrow_mut();
        if hub.phase != Phase::Ready {
            return false;
        }
        let Some(backend) = hub.backend.as_mut() else {
            return false;
        };
        let key = backend.observe(target);
        hub.records.insert(key, Rc::new(callback));
        true
    }

    /// Stop watching `target` and drop its record. Idempotent.
    pub fn unobserve(&self, target: &B::Target) {
        let hub = &mut *self.hub.borrow_mut();
        let Some(backend) = hub.backend.as_mut() else {
            return;
        };
        let Some(key) = backend.key_of(target) else {
            return;
        };
        hub.records.remove(&key);
        backend.unobserve(target);
    }

    /// Route a batch of changes to the registered callbacks.
    ///
    /// Entries are handled in batch order. Each lookup happens right before
    /// its callback runs, so a target unobserved earlier in the same batch is
    /// skipped. Entries without a record are ignored.
    pub fn dispatch<I>(&self, batch: I)
    where
        I: IntoIterator<Item = IntersectionEntry<B::Target>>,
    {
        for entry in batch {
            let callback = {
                let hub = self.hub.borrow();
                let Some(backend) = hub.backend.as_ref() else {
                    return;
                };
                backend
                    .key_of(&entry.target)
                    .and_then(|key| hub.records.get(&key).cloned())
            };
            if let Some(callback) = callback {
                callback(entry.is_intersecting, &entry);
            }
        }
    }

    /// Dispose of the backend and every record. Later calls are no-ops.
    pub fn teardown(&self) {
        let (backend, records, waiters) = {
            let hub = &mut *self.hub.borrow_mut();
            if hub.phase == Phase::TornDown {
                return;
            }
            hub.phase = Phase::TornDown;
            (hub.backend.take(), std::mem::take(&mut hub.records), std::mem::take(&mut hub.waiters))
        };
        if let Some(mut backend) = backend {
            backend.disconnect();
        }
        log::debug!(
            "visibility scope {:?} torn down ({} records, {} waiters dropped)",
            self.scope_id(),
            records.len(),
            waiters.len()
        );
        drop(records);
        drop(waiters);
    }
}

/// Weak counterpart of [`Multiplexer`].
pub struct WeakMultiplexer<B: ObservationBackend> {
    hub: Weak<RefCell<Hub<B>>>,
}

impl<B: ObservationBackend> Clone for WeakMultiplexer<B> {
    fn clone(&self) -> Self {
        Self { hub: Weak::clone(&self.hub) }
    }
}

impl<B: ObservationBackend> WeakMultiplexer<B> {
    #[must_use]
    pub fn upgrade(&self) -> Option<Multiplexer<B>> {
        self.hub.upgrade().map(|hub| Multiplexer { hub })
    }
}
