// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reduction errors.
//!
//! Two classes are kept apart:
//!
//! - [`PreconditionError`]: the caller handed over a candidate set that is
//!   too small to reduce. Raised before any rule runs; always a caller bug.
//! - [`Unreducible`]: the rule chain was exhausted without ever isolating a
//!   single candidate. An expected outcome the caller is meant to handle,
//!   e.g. by falling back to a default.
//!
//! [`ReduceError`] is the union returned by
//! [`Reducer::reduce`](crate::Reducer::reduce).

use std::fmt;

use crate::precondition::PreconditionError;

/// The rule chain ran out before exactly one candidate survived.
///
/// `remains` is the size of the narrowed working set at the point the chain
/// gave up; `0` is reported only when a tie-break had nothing to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unreducible {
    remains: usize,
}

impl Unreducible {
    /// Failure with `remains` candidates left.
    pub const fn new(remains: usize) -> Self {
        Self { remains }
    }

    /// Number of candidates left when reduction gave up.
    pub const fn remains(&self) -> usize {
        self.remains
    }

    /// Returns `true` when a lone candidate survived but no rule ever
    /// confirmed it.
    pub const fn is_unconfirmed_single(&self) -> bool {
        self.remains == 1
    }
}

impl fmt::Display for Unreducible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unable to reduce to a single valid element. ")?;
        if self.remains == 1 {
            f.write_str("Remains a single element but it is invalid.")
        } else {
            write!(f, "Remains: `{}`.", self.remains)
        }
    }
}

impl std::error::Error for Unreducible {}

/// Errors returned by [`Reducer::reduce`](crate::Reducer::reduce).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    /// Candidate set rejected before reduction started.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// Rule chain exhausted without isolating one candidate.
    #[error(transparent)]
    Unreducible(#[from] Unreducible),
}

impl ReduceError {
    /// Candidates left when reduction gave up; `None` for precondition
    /// failures.
    pub fn remains(&self) -> Option<usize> {
        match self {
            Self::Unreducible(err) => Some(err.remains()),
            Self::Precondition(_) => None,
        }
    }

    /// Returns `true` for the recoverable domain failure.
    pub fn is_unreducible(&self) -> bool {
        matches!(self, Self::Unreducible(_))
    }

    /// Returns `true` when the caller supplied an invalid candidate set.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
