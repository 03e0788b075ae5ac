//! Per-element visibility subscription.
//!
//! An [`InView`] binds one element at a time to a scope's [`Multiplexer`] and
//! keeps the latest visibility flag. Attaching before the scope is ready parks
//! the element and registers it from a readiness waiter; detaching first
//! cancels that. Dropping an [`InView`] detaches it.

#[cfg(test)]
#[path = "in_view_test.rs"]
mod in_view_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::entry::IntersectionEntry;
use crate::multiplexer::{Multiplexer, ObservationBackend};

type ChangeHandler<T> = Rc<dyn Fn(bool, &IntersectionEntry<T>)>;

struct Tracker<B: ObservationBackend> {
    scope: Multiplexer<B>,
    visible: bool,
    target: Option<B::Target>,
    registered: bool,
    waiting: bool,
    on_change: Option<ChangeHandler<B::Target>>,
    on_visibility: Option<Rc<dyn Fn(bool)>>,
}

/// Live visibility of whichever element is currently attached.
pub struct InView<B: ObservationBackend> {
    tracker: Rc<RefCell<Tracker<B>>>,
}

impl<B: ObservationBackend> InView<B> {
    /// Track visibility in `scope`, reporting `initial` until the first change.
    #[must_use]
    pub fn new(scope: &Multiplexer<B>, initial: bool) -> Self {
        Self {
            tracker: Rc::new(RefCell::new(Tracker {
                scope: scope.clone(),
                visible: initial,
                target: None,
                registered: false,
                waiting: false,
                on_change: None,
                on_visibility: None,
            })),
        }
    }

    /// Side effect run on every change, before the flag is updated.
    #[must_use]
    pub fn on_change(self, handler: impl Fn(bool, &IntersectionEntry<B::Target>) + 'static) -> Self {
        self.tracker.borrow_mut().on_change = Some(Rc::new(handler));
        self
    }

    /// Publisher for the updated flag, run after `on_change`.
    #[must_use]
    pub fn on_visibility(self, publish: impl Fn(bool) + 'static) -> Self {
        self.tracker.borrow_mut().on_visibility = Some(Rc::new(publish));
        self
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.tracker.borrow().visible
    }

    /// Whether the attached element currently holds an observation record.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.tracker.borrow().registered
    }

    #[must_use]
    pub fn target(&self) -> Option<B::Target> {
        self.tracker.borrow().target.clone()
    }

    /// Start tracking `target`, replacing any previously attached element.
    pub fn attach(&self, target: B::Target) {
        self.detach();
        let (scope, wait) = {
            let mut tracker = self.tracker.borrow_mut();
            tracker.target = Some(target);
            let wait = !tracker.scope.is_ready() && !tracker.waiting;
            tracker.waiting |= wait;
            (tracker.scope.clone(), wait)
        };
        if scope.is_ready() {
            register(&self.tracker);
        } else if wait {
            let weak = Rc::downgrade(&self.tracker);
            scope.on_ready(move || {
                if let Some(tracker) = weak.upgrade() {
                    tracker.borrow_mut().waiting = false;
                    register(&tracker);
                }
            });
        }
    }

    /// Stop tracking the attached element. Idempotent.
    pub fn detach(&self) {
        let (scope, target) = {
            let mut tracker = self.tracker.borrow_mut();
            let target = tracker.target.take();
            let registered = std::mem::replace(&mut tracker.registered, false);
            (tracker.scope.clone(), target.filter(|_| registered))
        };
        if let Some(target) = target {
            scope.unobserve(&target);
        }
    }
}

impl<B: ObservationBackend> Drop for InView<B> {
    fn drop(&mut self) {
        self.detach();
    }
}

fn register<B: ObservationBackend>(tracker: &Rc<RefCell<Tracker<B>>>) {
    let (scope, target) = {
        let tracker = tracker.borrow();
        if tracker.registered {
            return;
        }
        let Some(target) = tracker.target.clone() else {
            return;
        };
        (tracker.scope.clone(), target)
    };
    let weak = Rc::downgrade(tracker);
    let registered = scope.observe(&target, move |is_intersecting, entry| {
        if let Some(tracker) = weak.upgrade() {
            transition(&tracker, is_intersecting, entry);
        }
    });
    tracker.borrow_mut().registered = registered;
}

fn transition<B: ObservationBackend>(
    tracker: &Rc<RefCell<Tracker<B>>>,
    is_intersecting: bool,
    entry: &IntersectionEntry<B::Target>,
) {
    let on_change = tracker.borrow().on_change.clone();
    if let Some(on_change) = on_change {
        on_change(is_intersecting, entry);
    }
    let publish = {
        let mut tracker = tracker.borrow_mut();
        tracker.visible = is_intersecting;
        tracker.on_visibility.clone()
    };
    if let Some(publish) = publish {
        publish(is_intersecting);
    }
}
