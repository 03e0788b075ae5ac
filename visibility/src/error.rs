//! Error types for tracker configuration and scope lifecycle.
//!
//! ERROR HANDLING
//! ==============
//! Only API misuse is an error. Everything that can happen at runtime
//! (late events, double unobserve, calls after teardown) degrades to a no-op,
//! because a missed visibility update is a cosmetic defect at worst.

/// Integration mistakes surfaced synchronously at the misusing call site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    /// A visibility hook was created outside any provider scope.
    #[error("visibility hook used outside of an IntersectionObserverProvider")]
    MissingProvider,
    /// A dynamic-bounds hook was created in a scope without an id.
    #[error("dynamic-bounds visibility for item `{item}` requires a provider with a scope id")]
    MissingScope {
        /// Item the hook was created for.
        item: String,
    },
}

/// Errors from installing or configuring a scope's backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScopeError {
    /// The scope already has a live backend; readiness flips only once.
    #[error("scope backend is already installed")]
    AlreadyReady,
    /// The scope was torn down before the backend arrived.
    #[error("scope has been torn down")]
    TornDown,
    /// A configuration override is out of range.
    #[error("invalid scope option: {0}")]
    InvalidOption(String),
}
