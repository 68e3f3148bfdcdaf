// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Narrowing rule definitions.
use std::fmt;

/// Boxed element predicate used by [`RuleKind::Predicate`].
pub type PredicateFn<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Boxed whole-collection transform used by [`RuleKind::Transform`].
pub type TransformFn<E> = Box<dyn Fn(&[E]) -> Vec<E> + Send + Sync>;

/// How a rule narrows the working set.
pub enum RuleKind<E> {
    /// Keep the elements for which the predicate holds, in working-set order.
    ///
    /// The predicate is called exactly once per element of the working set.
    Predicate(PredicateFn<E>),
    /// Replace the working set with the transform's output.
    ///
    /// Used for grouping, deduplication or sort-then-take style rules where a
    /// single element cannot be judged in isolation.
    Transform(TransformFn<E>),
}

/// One ordered narrowing criterion.
///
/// Rules are owned by a [`Reducer`](crate::Reducer) and applied in the order
/// they were supplied, at most once per reduction. Whatever a rule returns,
/// the chain decides what to keep:
/// * exactly one survivor ends the chain (accept)
/// * several survivors replace the working set (narrow)
/// * no survivor leaves the working set untouched (revert)
pub struct Rule<E> {
    name: &'static str,
    kind: RuleKind<E>,
}

impl<E> Rule<E> {
    /// Default name for predicate rules.
    pub const PREDICATE_NAME: &'static str = "predicate";
    /// Default name for transform rules.
    pub const TRANSFORM_NAME: &'static str = "transform";

    /// Element predicate rule.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Self::PREDICATE_NAME,
            kind: RuleKind::Predicate(Box::new(f)),
        }
    }

    /// Whole-collection transform rule.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&[E]) -> Vec<E> + Send + Sync + 'static,
    {
        Self {
            name: Self::TRANSFORM_NAME,
            kind: RuleKind::Transform(Box::new(f)),
        }
    }

    /// Replace the rule's name (shown in logs and receipts).
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Human-readable name for logs and receipts.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The rule's narrowing behaviour.
    pub fn kind(&self) -> &RuleKind<E> {
        &self.kind
    }

    /// Returns `true` for transform rules.
    pub fn is_transform(&self) -> bool {
        matches!(self.kind, RuleKind::Transform(_))
    }

    /// Apply the rule to `remaining` and return its raw output.
    ///
    /// No accept/narrow/revert decision is taken here; see
    /// [`RuleChain`](crate::RuleChain).
    pub(crate) fn apply(&self, remaining: Vec<E>) -> RuleOutput<E> {
        match &self.kind {
            RuleKind::Predicate(pred) => {
                let keep: Vec<bool> = remaining.iter().map(pred.as_ref()).collect();
                let matched = keep.iter().filter(|k| **k).count();
                if matched == 0 {
                    return RuleOutput::Empty(remaining);
                }
                let filtered = remaining
                    .into_iter()
                    .zip(keep)
                    .filter_map(|(e, k)| k.then_some(e))
                    .collect();
                RuleOutput::Produced(filtered)
            }
            RuleKind::Transform(transform) => {
                let out = transform(&remaining);
                if out.is_empty() {
                    RuleOutput::Empty(remaining)
                } else {
                    RuleOutput::Produced(out)
                }
            }
        }
    }
}

impl<E> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RuleKind::Predicate(_) => "Predicate",
            RuleKind::Transform(_) => "Transform",
        };
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

/// Raw result of applying one rule.
///
/// `Empty` hands the untouched working set back so a revert costs no clone.
pub(crate) enum RuleOutput<E> {
    Empty(Vec<E>),
    Produced(Vec<E>),
}
