// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reducer configuration.

use std::borrow::Cow;

/// Label used by [`Reducer::single_pass`](crate::Reducer::single_pass).
pub const SINGLE_PASS_LABEL: &str = "single-pass";
/// Label used by [`Reducer::with_comparator`](crate::Reducer::with_comparator).
pub const TIE_BREAK_LABEL: &str = "tie-break";
/// Label used by [`Reducer::aggregate`](crate::Reducer::aggregate).
pub const AGGREGATE_LABEL: &str = "aggregate";

/// Minimum input size for the predicate and tie-break presets.
pub const SINGLE_PASS_MIN_CANDIDATES: usize = 1;
/// Minimum input size for the aggregate preset; it disambiguates between
/// genuine alternatives only.
pub const AGGREGATE_MIN_CANDIDATES: usize = 2;

/// Tunables shared by every reducer preset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReducerConfig {
    /// Name attached to the reducer's tracing span.
    pub label: Cow<'static, str>,
    /// Smallest candidate set accepted by `reduce`.
    ///
    /// Values below 1 behave as 1: an empty set is never reducible.
    pub min_candidates: usize,
}

impl ReducerConfig {
    /// Defaults for [`Reducer::single_pass`](crate::Reducer::single_pass).
    pub const fn single_pass() -> Self {
        Self {
            label: Cow::Borrowed(SINGLE_PASS_LABEL),
            min_candidates: SINGLE_PASS_MIN_CANDIDATES,
        }
    }

    /// Defaults for [`Reducer::with_comparator`](crate::Reducer::with_comparator).
    pub const fn tie_break() -> Self {
        Self {
            label: Cow::Borrowed(TIE_BREAK_LABEL),
            min_candidates: SINGLE_PASS_MIN_CANDIDATES,
        }
    }

    /// Defaults for [`Reducer::aggregate`](crate::Reducer::aggregate).
    pub const fn aggregate() -> Self {
        Self {
            label: Cow::Borrowed(AGGREGATE_LABEL),
            min_candidates: AGGREGATE_MIN_CANDIDATES,
        }
    }

    /// Set the tracing label.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the minimum candidate count.
    pub fn with_min_candidates(mut self, min: usize) -> Self {
        self.min_candidates = min;
        self
    }

    /// Minimum actually enforced (never below 1).
    pub fn effective_min_candidates(&self) -> usize {
        self.min_candidates.max(1)
    }
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self::single_pass()
    }
}
