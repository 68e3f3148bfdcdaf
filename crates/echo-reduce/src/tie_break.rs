// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Final best-of comparator step.
//!
//! A [`TieBreak`] runs once, after the rule chain is exhausted, over the
//! narrowed remainder only. It never fails on ties: among equal maxima the
//! first one in working-set order wins. Note that this differs from
//! [`Iterator::max_by`], which keeps the last.

use std::cmp::Ordering;
use std::fmt;

/// Boxed comparator used by [`TieBreak`].
pub type CompareFn<E> = Box<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// Comparator selecting a maximum among the chain's leftovers.
pub struct TieBreak<E> {
    compare: CompareFn<E>,
}

impl<E> TieBreak<E> {
    /// Wrap a comparator.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(compare),
        }
    }

    /// Tie-break on a key; larger keys win.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        Self::new(move |a, b| key(a).cmp(&key(b)))
    }

    /// Compare two candidates.
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        (self.compare)(a, b)
    }

    /// First maximum of `candidates`, or `None` if there are none.
    pub fn select(&self, candidates: Vec<E>) -> Option<E> {
        max_first_wins(candidates, |a, b| self.compare(a, b))
    }
}

impl<E> fmt::Debug for TieBreak<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieBreak").finish_non_exhaustive()
    }
}

/// Maximum under `compare`; ties keep the earliest element.
pub fn max_first_wins<E, I, F>(candidates: I, mut compare: F) -> Option<E>
where
    I: IntoIterator<Item = E>,
    F: FnMut(&E, &E) -> Ordering,
{
    let mut iter = candidates.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, next| {
        if compare(&next, &best) == Ordering::Greater {
            next
        } else {
            best
        }
    }))
}
