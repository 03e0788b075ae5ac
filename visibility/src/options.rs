//! Scope configuration: root margin, thresholds and scroll axis.
//!
//! DESIGN
//! ======
//! The root boundary is expanded along the scroll axis only, so items become
//! "visible" two viewports before they physically scroll in. That gives
//! consumers time to fetch data or mount heavy content without a flash.

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PREFETCH_MARGIN_PERCENT, DEFAULT_THRESHOLD};
use crate::error::ScopeError;

/// Primary scroll direction of the scope's root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Overrides applied when a scope constructs its backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeOptions {
    /// Scroll direction the prefetch margin is applied along.
    pub axis: Axis,
    /// Margin added before and after the root along `axis`, in percent.
    pub prefetch_margin_percent: f64,
    /// Explicit CSS root margin; replaces the computed prefetch margin.
    pub root_margin: Option<String>,
    /// Ratios at which the backend reports changes.
    pub thresholds: Vec<f64>,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            prefetch_margin_percent: DEFAULT_PREFETCH_MARGIN_PERCENT,
            root_margin: None,
            thresholds: vec![DEFAULT_THRESHOLD],
        }
    }
}

impl ScopeOptions {
    /// CSS `rootMargin` string (`top right bottom left`) for the backend.
    #[must_use]
    pub fn root_margin(&self) -> String {
        if let Some(margin) = self.root_margin.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            return margin.to_owned();
        }
        let prefetch = format!("{}%", self.prefetch_margin_percent);
        match self.axis {
            Axis::Vertical => format!("{prefetch} 0px {prefetch} 0px"),
            Axis::Horizontal => format!("0px {prefetch} 0px {prefetch}"),
        }
    }

    /// Check that the overrides describe a constructible observer.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidOption`] for a negative or non-finite
    /// prefetch margin, an empty threshold list, or a threshold outside
    /// `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ScopeError> {
        if !self.prefetch_margin_percent.is_finite() || self.prefetch_margin_percent < 0.0 {
            return Err(ScopeError::InvalidOption(format!(
                "prefetch margin must be a non-negative percentage, got {}",
                self.prefetch_margin_percent
            )));
        }
        if self.thresholds.is_empty() {
            return Err(ScopeError::InvalidOption("at least one threshold is required".to_owned()));
        }
        if let Some(bad) = self.thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(ScopeError::InvalidOption(format!("threshold {bad} is outside 0.0..=1.0")));
        }
        Ok(())
    }
}
