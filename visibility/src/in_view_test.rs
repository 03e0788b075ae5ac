use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::options::ScopeOptions;
use crate::testing::{FakeBackend, FakeElement, change};

fn pending_scope() -> Multiplexer<FakeBackend> {
    Multiplexer::new(Some("feed".to_owned()), ScopeOptions::default())
}

fn ready_scope() -> Multiplexer<FakeBackend> {
    let scope = pending_scope();
    scope.install(FakeBackend::new()).expect("install should succeed");
    scope
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn reports_initial_guess_until_first_change() {
    let scope = ready_scope();
    assert!(InView::new(&scope, true).is_visible());
    assert!(!InView::new(&scope, false).is_visible());
}

#[test]
fn attach_in_ready_scope_registers_immediately() {
    let scope = ready_scope();
    let view = InView::new(&scope, false);
    let a = FakeElement::new(1);
    view.attach(a.clone());
    assert!(view.is_registered());
    assert!(scope.is_observing(&a));
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn change_updates_visibility_flag() {
    let scope = ready_scope();
    let view = InView::new(&scope, false);
    let a = FakeElement::new(1);
    view.attach(a.clone());

    scope.dispatch([change(&a, true)]);
    assert!(view.is_visible());
    scope.dispatch([change(&a, false)]);
    assert!(!view.is_visible());
}

#[test]
fn on_change_runs_before_flag_is_published() {
    let scope = ready_scope();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let on_change_log = Rc::clone(&log);
    let publish_log = Rc::clone(&log);
    let view = InView::new(&scope, false)
        .on_change(move |is_intersecting, entry| {
            on_change_log.borrow_mut().push(format!("change {is_intersecting} #{}", entry.target.id));
        })
        .on_visibility(move |visible| publish_log.borrow_mut().push(format!("publish {visible}")));
    let a = FakeElement::new(7);
    view.attach(a.clone());

    scope.dispatch([change(&a, true)]);
    assert_eq!(*log.borrow(), vec!["change true #7".to_owned(), "publish true".to_owned()]);
}

#[test]
fn on_change_sees_previous_flag() {
    let scope = ready_scope();
    let seen = Rc::new(RefCell::new(None));
    let view = Rc::new(RefCell::new(None::<InView<FakeBackend>>));
    let view_for_handler = Rc::clone(&view);
    let sink = Rc::clone(&seen);
    let tracked = InView::new(&scope, false).on_change(move |_, _| {
        if let Some(view) = view_for_handler.borrow().as_ref() {
            *sink.borrow_mut() = Some(view.is_visible());
        }
    });
    let a = FakeElement::new(1);
    tracked.attach(a.clone());
    *view.borrow_mut() = Some(tracked);

    scope.dispatch([change(&a, true)]);
    assert_eq!(*seen.borrow(), Some(false));
    assert!(view.borrow().as_ref().is_some_and(InView::is_visible));
}

// =============================================================
// Readiness deferral
// =============================================================

#[test]
fn attach_before_ready_registers_once_ready() {
    let scope = pending_scope();
    let view = InView::new(&scope, false);
    let a = FakeElement::new(1);
    view.attach(a.clone());
    assert!(!view.is_registered());

    scope.install(FakeBackend::new()).expect("install should succeed");
    assert!(view.is_registered());

    scope.dispatch([change(&a, true)]);
    assert!(view.is_visible());
}

#[test]
fn reattach_before_ready_registers_latest_element_only() {
    let scope = pending_scope();
    let backend = FakeBackend::new();
    let view = InView::new(&scope, false);
    view.attach(FakeElement::new(1));
    view.attach(FakeElement::new(2));

    scope.install(backend.clone()).expect("install should succeed");
    assert_eq!(backend.observed(), vec![2]);
    assert_eq!(backend.observe_calls(), 1);
}

#[test]
fn detach_before_ready_is_never_registered() {
    let scope = pending_scope();
    let backend = FakeBackend::new();
    let view = InView::new(&scope, false);
    view.attach(FakeElement::new(1));
    view.detach();

    scope.install(backend.clone()).expect("install should succeed");
    assert!(!view.is_registered());
    assert_eq!(backend.observe_calls(), 0);
}

#[test]
fn dropped_view_before_ready_is_never_registered() {
    let scope = pending_scope();
    let backend = FakeBackend::new();
    let view = InView::new(&scope, false);
    view.attach(FakeElement::new(1));
    drop(view);

    scope.install(backend.clone()).expect("install should succeed");
    assert_eq!(backend.observe_calls(), 0);
}

#[test]
fn dropped_view_releases_its_record() {
    let scope = pending_scope();
    let backend = FakeBackend::new();
    scope.install(backend.clone()).expect("install should succeed");
    let view = InView::new(&scope, false);
    let a = FakeElement::new(7);
    view.attach(a.clone());
    assert_eq!(scope.registered_count(), 1);

    drop(view);
    assert_eq!(scope.registered_count(), 0);
    assert!(!scope.is_observing(&a));
    assert!(backend.observed().is_empty());
}

// =============================================================
// Detach and re-attach
// =============================================================

#[test]
fn detach_unregisters_from_scope() {
    let scope = ready_scope();
    let view = InView::new(&scope, false);
    let a = FakeElement::new(1);
    view.attach(a.clone());
    view.detach();

    assert!(!scope.is_observing(&a));
    assert!(view.target().is_none());
    scope.dispatch([change(&a, true)]);
    assert!(!view.is_visible());
}

#[test]
fn detach_twice_is_harmless() {
    let scope = ready_scope();
    let view = InView::new(&scope, false);
    view.attach(FakeElement::new(1));
    view.detach();
    view.detach();
    assert_eq!(scope.registered_count(), 0);
}

#[test]
fn reattach_moves_tracking_to_new_element() {
    let scope = ready_scope();
    let view = InView::new(&scope, false);
    let a = FakeElement::new(1);
    let b = FakeElement::new(2);
    view.attach(a.clone());
    view.attach(b.clone());

    assert!(!scope.is_observing(&a));
    assert!(scope.is_observing(&b));
    scope.dispatch([change(&a, true)]);
    assert!(!view.is_visible());
    scope.dispatch([change(&b, true)]);
    assert!(view.is_visible());
}

#[test]
fn teardown_leaves_view_inert() {
    let scope = ready_scope();
    let view = InView::new(&scope, true);
    let a = FakeElement::new(1);
    view.attach(a.clone());
    scope.teardown();

    view.detach();
    view.attach(a.clone());
    assert!(!view.is_registered());
    assert!(view.is_visible());
}
