// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reduction receipts: what each rule decided during one `reduce` call.
//!
//! A receipt is the diagnostic companion of a [`ReduceError`]: the error says
//! how many candidates were left, the receipt says which rules narrowed,
//! reverted or accepted on the way there.
//!
//! Entries appear in rule order and stop at the first accept, since later
//! rules are never consulted. A precondition failure yields an empty receipt.

use crate::chain::{Step, StepSink};
use crate::error::ReduceError;

/// One rule application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepRecord {
    /// Position of the rule in the chain.
    pub index: usize,
    /// Rule name.
    pub rule: &'static str,
    /// Working-set size handed to the rule.
    pub input: usize,
    /// Number of survivors the rule produced (before revert).
    pub output: usize,
    /// Decision taken.
    pub step: Step,
}

impl StepSink for Vec<StepRecord> {
    fn record(&mut self, index: usize, rule: &'static str, input: usize, output: usize, step: Step) {
        self.push(StepRecord {
            index,
            rule,
            input,
            output,
            step,
        });
    }
}

/// Terminal outcome of a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// A rule isolated exactly one candidate.
    Accepted,
    /// The chain left several candidates and the comparator picked one.
    TieBroken,
    /// The chain was exhausted without a unique survivor.
    Unreducible {
        /// Candidates left.
        remains: usize,
    },
    /// The candidate set failed the size precondition; no rule ran.
    Rejected,
}

/// Per-step record of a single reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionReceipt {
    candidates: usize,
    steps: Vec<StepRecord>,
    verdict: Verdict,
}

impl ReductionReceipt {
    pub(crate) fn new(candidates: usize, steps: Vec<StepRecord>, verdict: Verdict) -> Self {
        Self {
            candidates,
            steps,
            verdict,
        }
    }

    pub(crate) fn rejected(candidates: usize) -> Self {
        Self::new(candidates, Vec::new(), Verdict::Rejected)
    }

    /// Size of the candidate set handed to `reduce`.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Rule applications in chain order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Terminal outcome.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Number of rules that reverted.
    #[must_use]
    pub fn reverts(&self) -> usize {
        self.steps.iter().filter(|s| s.step == Step::Revert).count()
    }

    /// The rule that accepted, if any.
    #[must_use]
    pub fn accepted_by(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.step == Step::Accept)
    }

    /// Working-set size after the last step (or the input size when no rule
    /// ran).
    #[must_use]
    pub fn final_size(&self) -> usize {
        self.steps
            .iter()
            .rev()
            .find(|s| s.step != Step::Revert)
            .map_or(self.candidates, |s| s.output)
    }

    /// Verdict matching a `reduce` result.
    pub(crate) fn verdict_for<E>(result: &Result<E, ReduceError>, tie_broken: bool) -> Verdict {
        match result {
            Ok(_) if tie_broken => Verdict::TieBroken,
            Ok(_) => Verdict::Accepted,
            Err(ReduceError::Unreducible(err)) => Verdict::Unreducible {
                remains: err.remains(),
            },
            Err(ReduceError::Precondition(_)) => Verdict::Rejected,
        }
    }
}
