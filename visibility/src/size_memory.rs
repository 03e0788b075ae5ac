//! Last-known element sizes keyed by `(scope, item)`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dynamic-height items record their rendered size when they leave the
//! viewport. When the same logical item mounts again (after a route change or
//! a virtualized list recycling its rows) the remembered size lets it start
//! collapsed at the right height instead of re-rendering its full content.
//!
//! TRADE-OFFS
//! ==========
//! The shared memory lives for the whole session and is never evicted. Item
//! ids are reused across remounts so the set stays proportional to the number
//! of distinct items a user has scrolled past. Long sessions over unbounded
//! feeds grow without limit.

#[cfg(test)]
#[path = "size_memory_test.rs"]
mod size_memory_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

thread_local! {
    static SHARED: RefCell<SizeMemory> = RefCell::new(SizeMemory::new());
}

/// Composite key of a scope id and a caller-supplied item id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SizeKey {
    pub scope: String,
    pub item: String,
}

impl SizeKey {
    #[must_use]
    pub fn new(scope: impl Into<String>, item: impl Into<String>) -> Self {
        Self { scope: scope.into(), item: item.into() }
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.item)
    }
}

/// Measured box size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeEntry {
    pub width: f64,
    pub height: f64,
}

/// Map of remembered sizes. Last write per key wins.
#[derive(Debug, Default)]
pub struct SizeMemory {
    entries: HashMap<SizeKey, SizeEntry>,
}

impl SizeMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &SizeKey) -> Option<SizeEntry> {
        self.entries.get(key).copied()
    }

    /// Store `entry` under `key`, replacing any earlier size.
    ///
    /// Heights that are zero, negative or non-finite are ignored: they mean
    /// the element had not rendered yet, not that it collapsed. Returns
    /// whether the entry was stored.
    pub fn record(&mut self, key: SizeKey, entry: SizeEntry) -> bool {
        if !entry.height.is_finite() || entry.height <= 0.0 {
            return false;
        }
        self.entries.insert(key, entry);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Look up the shared size for `key`.
#[must_use]
pub fn lookup(key: &SizeKey) -> Option<SizeEntry> {
    SHARED.with(|memory| memory.borrow().get(key))
}

/// Record a size in the shared memory. See [`SizeMemory::record`].
pub fn record(key: SizeKey, entry: SizeEntry) -> bool {
    let stored = SHARED.with(|memory| memory.borrow_mut().record(key.clone(), entry));
    if stored {
        log::trace!("size memory: {key} -> {}x{}", entry.width, entry.height);
    }
    stored
}

/// Number of keys in the shared memory.
#[must_use]
pub fn len() -> usize {
    SHARED.with(|memory| memory.borrow().len())
}

#[must_use]
pub fn is_empty() -> bool {
    SHARED.with(|memory| memory.borrow().is_empty())
}
