use super::*;
use visibility::{Axis, Phase};

// =============================================================
// effective_options
// =============================================================

#[test]
fn effective_options_defaults_when_absent() {
    assert_eq!(effective_options(None), ScopeOptions::default());
}

#[test]
fn effective_options_keeps_valid_overrides() {
    let options = ScopeOptions { axis: Axis::Horizontal, prefetch_margin_percent: 50.0, ..ScopeOptions::default() };
    assert_eq!(effective_options(Some(options.clone())), options);
}

#[test]
fn effective_options_falls_back_for_invalid_overrides() {
    let options = ScopeOptions { thresholds: vec![2.0], ..ScopeOptions::default() };
    assert_eq!(effective_options(Some(options)), ScopeOptions::default());

    let options = ScopeOptions { prefetch_margin_percent: -10.0, ..ScopeOptions::default() };
    assert_eq!(effective_options(Some(options)), ScopeOptions::default());
}

// =============================================================
// VisibilityScope
// =============================================================

#[test]
fn scope_starts_pending() {
    Owner::new().with(|| {
        let scope = VisibilityScope::new(Some("feed".to_owned()), ScopeOptions::default());
        assert_eq!(scope.id(), Some("feed"));
        assert_eq!(scope.multiplexer().phase(), Phase::Pending);
        assert_eq!(scope.multiplexer().scope_id().as_deref(), Some("feed"));
    });
}

#[test]
fn scope_treats_empty_id_as_absent() {
    Owner::new().with(|| {
        let scope = VisibilityScope::new(Some(String::new()), ScopeOptions::default());
        assert_eq!(scope.id(), None);
        assert_eq!(scope.multiplexer().scope_id(), None);
    });
}

#[test]
fn scope_teardown_is_terminal() {
    Owner::new().with(|| {
        let scope = VisibilityScope::new(None, ScopeOptions::default());
        scope.teardown();
        scope.teardown();
        assert_eq!(scope.multiplexer().phase(), Phase::TornDown);
    });
}
