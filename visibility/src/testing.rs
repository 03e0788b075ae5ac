//! In-memory backend and element used by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dynamic::MeasuredTarget;
use crate::entry::{IntersectionEntry, Rect};
use crate::multiplexer::ObservationBackend;

#[derive(Debug, Default)]
struct ElementState {
    width: f64,
    height: f64,
    pinned_height: Option<String>,
}

/// Element with a settable rendered size and an inline height style.
#[derive(Clone, Debug)]
pub struct FakeElement {
    pub id: u32,
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new(id: u32) -> Self {
        Self { id, state: Rc::new(RefCell::new(ElementState::default())) }
    }

    pub fn with_size(id: u32, width: f64, height: f64) -> Self {
        let element = Self::new(id);
        element.resize(width, height);
        element
    }

    pub fn resize(&self, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    pub fn height_style(&self) -> Option<String> {
        self.state.borrow().pinned_height.clone()
    }
}

impl MeasuredTarget for FakeElement {
    fn measure(&self) -> Rect {
        let state = self.state.borrow();
        Rect::sized(state.width, state.height)
    }

    fn pin_height(&self, height: f64) {
        self.state.borrow_mut().pinned_height = Some(format!("{height}px"));
    }

    fn release_height(&self) {
        self.state.borrow_mut().pinned_height = None;
    }
}

/// Backend that records what it was asked to watch. Clones share state so a
/// test can keep a handle after installing the backend.
#[derive(Clone, Debug, Default)]
pub struct FakeBackend {
    observed: Rc<RefCell<Vec<u32>>>,
    observe_calls: Rc<Cell<usize>>,
    disconnected: Rc<Cell<bool>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> Vec<u32> {
        self.observed.borrow().clone()
    }

    pub fn observe_calls(&self) -> usize {
        self.observe_calls.get()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }
}

impl ObservationBackend for FakeBackend {
    type Target = FakeElement;
    type Key = u32;

    fn observe(&mut self, target: &FakeElement) -> u32 {
        self.observe_calls.set(self.observe_calls.get() + 1);
        let mut observed = self.observed.borrow_mut();
        if !observed.contains(&target.id) {
            observed.push(target.id);
        }
        target.id
    }

    fn key_of(&self, target: &FakeElement) -> Option<u32> {
        self.observed.borrow().contains(&target.id).then_some(target.id)
    }

    fn unobserve(&mut self, target: &FakeElement) {
        self.observed.borrow_mut().retain(|id| *id != target.id);
    }

    fn disconnect(&mut self) {
        self.observed.borrow_mut().clear();
        self.disconnected.set(true);
    }
}

/// Change record for `target` with the given flag.
pub fn change(target: &FakeElement, is_intersecting: bool) -> IntersectionEntry<FakeElement> {
    IntersectionEntry::new(target.clone(), is_intersecting)
}
