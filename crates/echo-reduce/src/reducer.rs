// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Public reducer: rule chain + optional tie-break + size precondition.
//!
//! One algorithm backs all three presets:
//!
//! - [`Reducer::single_pass`]: predicate rules; the chain must isolate one
//!   candidate on its own.
//! - [`Reducer::with_comparator`]: when the chain leaves several candidates,
//!   the comparator picks the first maximum among them.
//! - [`Reducer::aggregate`]: whole-collection transform rules over at least
//!   two candidates.
//!
//! # Leftover policy
//!
//! A working set that shrinks to one element through a rule is accepted on
//! the spot. A lone element that no rule ever confirmed (only possible when
//! the input itself had one element) is **not** accepted: it fails with
//! `remains == 1`, in every preset. The comparator ranks alternatives; it does
//! not validate a lone candidate.
//!
//! Failures report the size of the *narrowed* working set, not the input.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, instrument};

use crate::chain::{Narrowed, RuleChain, StepSink};
use crate::config::ReducerConfig;
use crate::error::{ReduceError, Unreducible};
use crate::precondition::require_size_at_least;
use crate::receipt::{ReductionReceipt, StepRecord};
use crate::rule::Rule;
use crate::tie_break::TieBreak;

/// Reduces a candidate set to a single element through an ordered rule chain.
///
/// Reducers are immutable once built. Each [`reduce`](Reducer::reduce) call
/// walks the rule list from the start, so one reducer can serve any number of
/// calls, including concurrent ones.
///
/// # Example
///
/// ```
/// use echo_reduce::{Reducer, Rule};
///
/// let reducer = Reducer::single_pass([
///     Rule::predicate(|n: &u32| n % 2 == 0).named("even"),
///     Rule::predicate(|n: &u32| *n > 10).named("large"),
/// ]);
///
/// assert_eq!(reducer.reduce([3, 4, 12, 7]), Ok(12));
/// assert_eq!(reducer.reduce([2, 4]).unwrap_err().remains(), Some(2));
/// ```
pub struct Reducer<E> {
    chain: RuleChain<E>,
    tie_break: Option<TieBreak<E>>,
    config: ReducerConfig,
}

struct Run<E> {
    candidates: usize,
    result: Result<E, ReduceError>,
    tie_broken: bool,
}

impl<E> Reducer<E> {
    /// Predicate-chain reducer accepting one or more candidates.
    pub fn single_pass<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<E>>,
    {
        Self {
            chain: RuleChain::new(rules),
            tie_break: None,
            config: ReducerConfig::single_pass(),
        }
    }

    /// Rule chain followed by a best-of comparator.
    pub fn with_comparator<F, I>(compare: F, rules: I) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
        I: IntoIterator<Item = Rule<E>>,
    {
        Self {
            chain: RuleChain::new(rules),
            tie_break: Some(TieBreak::new(compare)),
            config: ReducerConfig::tie_break(),
        }
    }

    /// Transform-chain reducer requiring at least two candidates.
    pub fn aggregate<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<E>>,
    {
        Self {
            chain: RuleChain::new(rules),
            tie_break: None,
            config: ReducerConfig::aggregate(),
        }
    }

    /// Start a custom reducer.
    pub fn builder() -> ReducerBuilder<E> {
        ReducerBuilder::new()
    }

    /// The rule chain.
    pub fn chain(&self) -> &RuleChain<E> {
        &self.chain
    }

    /// The trailing comparator, if any.
    pub fn tie_break(&self) -> Option<&TieBreak<E>> {
        self.tie_break.as_ref()
    }

    /// Active configuration.
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Reduce `candidates` to a single element.
    ///
    /// Candidates are consumed in iteration order; that order decides which
    /// element a tie-break keeps among equals.
    ///
    /// # Errors
    ///
    /// - [`ReduceError::Precondition`] when fewer than
    ///   [`ReducerConfig::min_candidates`] are supplied. No rule runs.
    /// - [`ReduceError::Unreducible`] when the chain (and tie-break, if any)
    ///   cannot isolate exactly one candidate.
    #[instrument(
        level = "debug",
        skip_all,
        fields(reducer = %self.config.label, rules = self.chain.len())
    )]
    pub fn reduce<I>(&self, candidates: I) -> Result<E, ReduceError>
    where
        I: IntoIterator<Item = E>,
    {
        self.run(candidates, &mut ()).result
    }

    /// Like [`reduce`](Reducer::reduce), also returning a per-rule receipt.
    #[instrument(
        level = "debug",
        skip_all,
        fields(reducer = %self.config.label, rules = self.chain.len())
    )]
    pub fn reduce_with_receipt<I>(&self, candidates: I) -> (Result<E, ReduceError>, ReductionReceipt)
    where
        I: IntoIterator<Item = E>,
    {
        let mut steps: Vec<StepRecord> = Vec::with_capacity(self.chain.len());
        let run = self.run(candidates, &mut steps);
        let receipt = if matches!(run.result, Err(ReduceError::Precondition(_))) {
            ReductionReceipt::rejected(run.candidates)
        } else {
            let verdict = ReductionReceipt::verdict_for(&run.result, run.tie_broken);
            ReductionReceipt::new(run.candidates, steps, verdict)
        };
        (run.result, receipt)
    }

    fn run<I, S>(&self, candidates: I, sink: &mut S) -> Run<E>
    where
        I: IntoIterator<Item = E>,
        S: StepSink,
    {
        let candidates: Vec<E> = candidates.into_iter().collect();
        let count = candidates.len();
        let min = self.config.effective_min_candidates();
        let candidates = match require_size_at_least::<_, E>(min, candidates) {
            Ok(candidates) => candidates,
            Err(err) => {
                debug!(candidates = count, required = min, "candidate set rejected");
                return Run {
                    candidates: count,
                    result: Err(err.into()),
                    tie_broken: false,
                };
            }
        };

        let (result, tie_broken) = match self.chain.narrow_observed(candidates, sink) {
            Narrowed::Accepted(one) => {
                debug!(candidates = count, "accepted by rule");
                (Ok(one), false)
            }
            Narrowed::Exhausted(rest) => self.settle(rest),
        };
        if let Err(ReduceError::Unreducible(err)) = &result {
            debug!(candidates = count, remains = err.remains(), "unreducible");
        }
        Run {
            candidates: count,
            result,
            tie_broken,
        }
    }

    /// Decide what an exhausted chain's leftovers amount to.
    fn settle(&self, rest: Vec<E>) -> (Result<E, ReduceError>, bool) {
        let remains = rest.len();
        // A lone leftover was never confirmed by a rule.
        if remains == 1 {
            return (Err(Unreducible::new(1).into()), false);
        }
        match &self.tie_break {
            Some(tie_break) => match tie_break.select(rest) {
                Some(best) => {
                    debug!(remains, "tie broken by comparator");
                    (Ok(best), true)
                }
                None => (Err(Unreducible::new(0).into()), false),
            },
            None => (Err(Unreducible::new(remains).into()), false),
        }
    }
}

impl<E> fmt::Debug for Reducer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("config", &self.config)
            .field("rules", &self.chain)
            .field("tie_break", &self.tie_break.is_some())
            .finish()
    }
}

/// Builder for reducers that do not fit a preset (mixed rule kinds, custom
/// minimum size, custom label).
///
/// ```
/// use echo_reduce::{Reducer, Rule};
///
/// let reducer = Reducer::builder()
///     .label("overloads")
///     .predicate(|arity: &u8| *arity >= 2)
///     .transform(|all: &[u8]| {
///         let min = all.iter().copied().min().unwrap_or_default();
///         all.iter().copied().filter(|a| *a == min).collect()
///     })
///     .compare(|a: &u8, b: &u8| a.cmp(b))
///     .build();
///
/// assert_eq!(reducer.reduce([1, 3, 2, 2]), Ok(2));
/// ```
pub struct ReducerBuilder<E> {
    rules: Vec<Rule<E>>,
    tie_break: Option<TieBreak<E>>,
    config: ReducerConfig,
}

impl<E> Default for ReducerBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ReducerBuilder<E> {
    /// Empty builder with [`ReducerConfig::single_pass`] defaults.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_break: None,
            config: ReducerConfig::single_pass(),
        }
    }

    /// Append a rule.
    pub fn rule(mut self, rule: Rule<E>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules in order.
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<E>>,
    {
        self.rules.extend(rules);
        self
    }

    /// Append a predicate rule.
    pub fn predicate<F>(self, f: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::predicate(f))
    }

    /// Append a transform rule.
    pub fn transform<F>(self, f: F) -> Self
    where
        F: Fn(&[E]) -> Vec<E> + Send + Sync + 'static,
    {
        self.rule(Rule::transform(f))
    }

    /// Set the trailing comparator.
    pub fn compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        self.tie_break = Some(TieBreak::new(compare));
        self
    }

    /// Set the trailing tie-break.
    pub fn tie_break(mut self, tie_break: TieBreak<E>) -> Self {
        self.tie_break = Some(tie_break);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ReducerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the tracing label.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.config = self.config.with_label(label);
        self
    }

    /// Set the minimum candidate count.
    pub fn min_candidates(mut self, min: usize) -> Self {
        self.config = self.config.with_min_candidates(min);
        self
    }

    /// Finish the reducer.
    pub fn build(self) -> Reducer<E> {
        Reducer {
            chain: RuleChain::new(self.rules),
            tie_break: self.tie_break,
            config: self.config,
        }
    }
}
