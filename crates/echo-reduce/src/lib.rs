// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-reduce: single-pass, rule-ordered disambiguation.
//!
//! Given a candidate set and an ordered chain of narrowing rules, a
//! [`Reducer`] narrows the set rule by rule until exactly one candidate is
//! left, or reports how many were still standing when the rules ran out.
//!
//! Each rule is applied once, in order:
//! * one survivor: **accept** and stop
//! * several survivors: **narrow** the working set to them
//! * no survivor: **revert** (the rule abstains)
//!
//! Rules are either element predicates or whole-collection transforms
//! ([`Rule`]); an optional [`TieBreak`] comparator picks among whatever the
//! chain leaves behind.
//!
//! ```
//! use echo_reduce::{Reducer, Rule};
//!
//! #[derive(Debug, PartialEq)]
//! struct Overload { name: &'static str, arity: u8, exact: bool }
//!
//! let reducer = Reducer::with_comparator(
//!     |a: &Overload, b: &Overload| b.arity.cmp(&a.arity),
//!     [
//!         Rule::predicate(|o: &Overload| o.arity >= 1).named("callable-with-one"),
//!         Rule::predicate(|o: &Overload| o.exact).named("exact-types"),
//!     ],
//! );
//!
//! let picked = reducer.reduce([
//!     Overload { name: "f()", arity: 0, exact: true },
//!     Overload { name: "f(a)", arity: 1, exact: false },
//!     Overload { name: "f(a, b)", arity: 2, exact: false },
//! ]);
//! assert_eq!(picked.map(|o| o.name), Ok("f(a)"));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod chain;
/// Reducer tunables and preset defaults.
pub mod config;
mod error;
/// Collection size preconditions.
pub mod precondition;
mod receipt;
mod reducer;
mod rule;
mod tie_break;

/// Rule chain walk and per-step decisions.
pub use chain::{Narrowed, RuleChain, Step};
/// Reducer configuration.
pub use config::ReducerConfig;
/// Error types.
pub use error::{ReduceError, Unreducible};
/// Precondition failure.
pub use precondition::PreconditionError;
/// Diagnostic receipts.
pub use receipt::{ReductionReceipt, StepRecord, Verdict};
/// Reducer and builder.
pub use reducer::{Reducer, ReducerBuilder};
/// Narrowing rules.
pub use rule::{PredicateFn, Rule, RuleKind, TransformFn};
/// Tie-break comparator.
pub use tie_break::{max_first_wins, CompareFn, TieBreak};
