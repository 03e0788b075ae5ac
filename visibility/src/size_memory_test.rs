use super::*;

fn entry(width: f64, height: f64) -> SizeEntry {
    SizeEntry { width, height }
}

// =============================================================
// SizeMemory
// =============================================================

#[test]
fn new_memory_is_empty() {
    let memory = SizeMemory::new();
    assert!(memory.is_empty());
    assert_eq!(memory.get(&SizeKey::new("feed", "item-1")), None);
}

#[test]
fn record_then_get_returns_entry() {
    let mut memory = SizeMemory::new();
    assert!(memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 120.0)));
    assert_eq!(memory.get(&SizeKey::new("feed", "item-1")), Some(entry(300.0, 120.0)));
    assert_eq!(memory.len(), 1);
}

#[test]
fn last_write_wins() {
    let mut memory = SizeMemory::new();
    memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 120.0));
    memory.record(SizeKey::new("feed", "item-1"), entry(310.0, 140.0));
    assert_eq!(memory.get(&SizeKey::new("feed", "item-1")), Some(entry(310.0, 140.0)));
    assert_eq!(memory.len(), 1);
}

#[test]
fn keys_are_scoped() {
    let mut memory = SizeMemory::new();
    memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 120.0));
    assert_eq!(memory.get(&SizeKey::new("sidebar", "item-1")), None);
}

#[test]
fn zero_height_is_not_recorded() {
    let mut memory = SizeMemory::new();
    assert!(!memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 0.0)));
    assert!(memory.is_empty());
}

#[test]
fn zero_height_does_not_overwrite_existing_entry() {
    let mut memory = SizeMemory::new();
    memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 120.0));
    memory.record(SizeKey::new("feed", "item-1"), entry(300.0, 0.0));
    assert_eq!(memory.get(&SizeKey::new("feed", "item-1")), Some(entry(300.0, 120.0)));
}

#[test]
fn non_finite_height_is_not_recorded() {
    let mut memory = SizeMemory::new();
    assert!(!memory.record(SizeKey::new("feed", "item-1"), entry(300.0, f64::INFINITY)));
    assert!(!memory.record(SizeKey::new("feed", "item-1"), entry(300.0, f64::NAN)));
    assert!(memory.is_empty());
}

#[test]
fn key_display_joins_scope_and_item() {
    assert_eq!(SizeKey::new("feed", "item-42").to_string(), "feed:item-42");
}

// =============================================================
// Shared memory
// =============================================================

#[test]
fn shared_memory_round_trips_through_free_functions() {
    let key = SizeKey::new("shared-test", "item-1");
    assert_eq!(lookup(&key), None);
    let before = len();
    assert!(record(key.clone(), entry(200.0, 80.0)));
    assert_eq!(lookup(&key), Some(entry(200.0, 80.0)));
    assert_eq!(len(), before + 1);
}

#[test]
fn shared_memory_is_not_empty_after_record() {
    assert!(record(SizeKey::new("shared-test", "item-2"), entry(120.0, 40.0)));
    assert!(!is_empty());
    assert_eq!(is_empty(), len() == 0);
}
