// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-pass rule chain: the accept / narrow / revert loop.
//!
//! The chain walks its rules once, in order, over an owned working set:
//!
//! | rule output size | step | effect |
//! |---|---|---|
//! | `1` | [`Step::Accept`] | stop; the survivor is the result |
//! | `> 1` | [`Step::Narrow`] | the output becomes the working set |
//! | `0` | [`Step::Revert`] | output discarded; working set unchanged |
//!
//! Running out of rules yields [`Narrowed::Exhausted`] with whatever is left.
//! Deciding whether that leftover is a failure belongs to the caller (see
//! [`Reducer`](crate::Reducer)).
//!
//! Every call to [`RuleChain::narrow`] walks the rule list from the start, so a
//! chain can be reused and shared between threads.

use std::fmt;

use tracing::trace;

use crate::rule::{Rule, RuleOutput};

/// Decision taken for a single rule application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The rule left exactly one survivor; the chain stops.
    Accept,
    /// The rule left several survivors; they replace the working set.
    Narrow,
    /// The rule eliminated everyone; its output is discarded.
    Revert,
}

impl Step {
    /// Stable lowercase label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Narrow => "narrow",
            Self::Revert => "revert",
        }
    }
}

/// Where a chain walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrowed<E> {
    /// A rule isolated exactly one candidate.
    Accepted(E),
    /// Every rule was applied without an accept; the final working set.
    ///
    /// Never empty when the walk started from a non-empty set.
    Exhausted(Vec<E>),
}

impl<E> Narrowed<E> {
    /// Number of candidates the walk ended with.
    pub fn len(&self) -> usize {
        match self {
            Self::Accepted(_) => 1,
            Self::Exhausted(rest) => rest.len(),
        }
    }

    /// Returns `true` if the walk ended with nothing (only possible from an
    /// empty start).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into the final set, whatever the outcome.
    pub fn into_vec(self) -> Vec<E> {
        match self {
            Self::Accepted(one) => vec![one],
            Self::Exhausted(rest) => rest,
        }
    }
}

/// Observer for individual chain steps.
pub(crate) trait StepSink {
    fn record(&mut self, index: usize, rule: &'static str, input: usize, output: usize, step: Step);
}

impl StepSink for () {
    #[inline]
    fn record(&mut self, _: usize, _: &'static str, _: usize, _: usize, _: Step) {}
}

/// Immutable ordered list of rules.
pub struct RuleChain<E> {
    rules: Vec<Rule<E>>,
}

impl<E> fmt::Debug for RuleChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}

impl<E> Default for RuleChain<E> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<E> RuleChain<E> {
    /// Chain over `rules`, applied in iteration order.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<E>>,
    {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Append a rule at the end of the chain.
    pub fn push(&mut self, rule: Rule<E>) {
        self.rules.push(rule);
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[Rule<E>] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the chain has no rules (every walk is exhausted
    /// immediately).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Walk the chain once over `candidates`.
    ///
    /// No size precondition is checked here; callers validate first.
    pub fn narrow(&self, candidates: Vec<E>) -> Narrowed<E> {
        self.narrow_observed(candidates, &mut ())
    }

    pub(crate) fn narrow_observed<S>(&self, candidates: Vec<E>, sink: &mut S) -> Narrowed<E>
    where
        S: StepSink + ?Sized,
    {
        let mut remaining = candidates;
        for (index, rule) in self.rules.iter().enumerate() {
            let input = remaining.len();
            let (step, output) = match rule.apply(remaining) {
                RuleOutput::Empty(untouched) => {
                    remaining = untouched;
                    (Step::Revert, 0)
                }
                RuleOutput::Produced(mut filtered) => {
                    let output = filtered.len();
                    if output == 1 {
                        sink.record(index, rule.name(), input, output, Step::Accept);
                        trace!(rule = rule.name(), index, input, output, step = "accept");
                        return match filtered.pop() {
                            Some(one) => Narrowed::Accepted(one),
                            None => Narrowed::Exhausted(filtered),
                        };
                    }
                    remaining = filtered;
                    (Step::Narrow, output)
                }
            };
            sink.record(index, rule.name(), input, output, step);
            trace!(rule = rule.name(), index, input, output, step = step.as_str());
        }
        Narrowed::Exhausted(remaining)
    }
}

impl<E> FromIterator<Rule<E>> for RuleChain<E> {
    fn from_iter<I: IntoIterator<Item = Rule<E>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Steps(Vec<(usize, Step)>);

    impl StepSink for Steps {
        fn record(&mut self, index: usize, _: &'static str, _: usize, _: usize, step: Step) {
            self.0.push((index, step));
        }
    }

    fn even() -> Rule<u32> {
        Rule::predicate(|n: &u32| n % 2 == 0)
    }

    fn never() -> Rule<u32> {
        Rule::predicate(|_: &u32| false)
    }

    fn eq(target: u32) -> Rule<u32> {
        Rule::predicate(move |n: &u32| *n == target)
    }

    #[test]
    fn empty_chain_is_exhausted_with_full_input() {
        let chain = RuleChain::<u32>::default();
        assert_eq!(chain.narrow(vec![1, 2, 3]), Narrowed::Exhausted(vec![1, 2, 3]));
    }

    #[test]
    fn accept_stops_the_walk() {
        let chain = RuleChain::new([eq(2), never()]);
        let mut steps = Steps::default();
        let out = chain.narrow_observed(vec![1, 2, 3], &mut steps);
        assert_eq!(out, Narrowed::Accepted(2));
        assert_eq!(steps.0, vec![(0, Step::Accept)]);
    }

    #[test]
    fn revert_keeps_working_set_for_next_rule() {
        let chain = RuleChain::new([never(), even(), eq(4)]);
        let mut steps = Steps::default();
        let out = chain.narrow_observed(vec![1, 2, 3, 4], &mut steps);
        assert_eq!(out, Narrowed::Accepted(4));
        assert_eq!(
            steps.0,
            vec![(0, Step::Revert), (1, Step::Narrow), (2, Step::Accept)]
        );
    }

    #[test]
    fn exhausted_reports_narrowed_set() {
        let chain = RuleChain::new([even(), never()]);
        assert_eq!(chain.narrow(vec![1, 2, 3, 4, 6]), Narrowed::Exhausted(vec![2, 4, 6]));
    }

    #[test]
    fn narrowed_helpers() {
        let accepted: Narrowed<u8> = Narrowed::Accepted(9);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted.into_vec(), vec![9]);
        let exhausted: Narrowed<u8> = Narrowed::Exhausted(vec![]);
        assert!(exhausted.is_empty());
    }
}
