// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collection size preconditions.
//!
//! Helpers return the subject unchanged on success so they compose at the
//! call site:
//!
//! ```
//! use echo_reduce::precondition::require_size_at_least;
//!
//! let pair = require_size_at_least(2, vec!["a", "b"]).unwrap();
//! assert_eq!(pair.len(), 2);
//! assert!(require_size_at_least(2, vec!["a"]).is_err());
//! ```

use std::borrow::Cow;

/// Message used by [`require_not_empty`].
pub const NOT_EMPTY_MESSAGE: &str = "must not be empty";

/// A collection was smaller than required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[REDUCE_PRECONDITION] {message} (required at least {required}, got {actual})")]
pub struct PreconditionError {
    required: usize,
    actual: usize,
    message: Cow<'static, str>,
}

impl PreconditionError {
    /// Build an error for a collection of `actual` elements that needed
    /// `required`.
    pub fn new(required: usize, actual: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            required,
            actual,
            message: message.into(),
        }
    }

    /// Minimum number of elements that was required.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of elements actually supplied.
    pub fn actual(&self) -> usize {
        self.actual
    }

    /// Caller-facing detail message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Returns `subject` if it holds at least one element.
///
/// # Errors
///
/// Returns a [`PreconditionError`] carrying [`NOT_EMPTY_MESSAGE`] when
/// `subject` is empty.
pub fn require_not_empty<C, T>(subject: C) -> Result<C, PreconditionError>
where
    C: AsRef<[T]>,
{
    require_not_empty_with(subject, NOT_EMPTY_MESSAGE)
}

/// Like [`require_not_empty`] with a caller-supplied message.
///
/// # Errors
///
/// Returns a [`PreconditionError`] carrying `message` when `subject` is empty.
pub fn require_not_empty_with<C, T>(
    subject: C,
    message: impl Into<Cow<'static, str>>,
) -> Result<C, PreconditionError>
where
    C: AsRef<[T]>,
{
    if subject.as_ref().is_empty() {
        return Err(PreconditionError::new(1, 0, message));
    }
    Ok(subject)
}

/// Returns `subject` if it holds at least `min` elements.
///
/// # Errors
///
/// Returns a [`PreconditionError`] when `subject` holds fewer than `min`
/// elements.
pub fn require_size_at_least<C, T>(min: usize, subject: C) -> Result<C, PreconditionError>
where
    C: AsRef<[T]>,
{
    let actual = subject.as_ref().len();
    if actual < min {
        let message = if actual == 0 {
            Cow::Borrowed(NOT_EMPTY_MESSAGE)
        } else {
            Cow::Owned(format!("must hold at least {min} elements"))
        };
        return Err(PreconditionError::new(min, actual, message));
    }
    Ok(subject)
}
