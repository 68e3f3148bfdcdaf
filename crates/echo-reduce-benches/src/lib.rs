// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared fixtures for the echo-reduce benchmarks.
//!
//! Candidates are plain `u64` values `0..n`. Rule chains are built from
//! divisibility predicates so every chain length and narrowing ratio is
//! reproducible without randomness.

use echo_reduce::{Reducer, Rule};

/// Rule name used by every divisibility predicate.
pub const DIVISIBLE_RULE_NAME: &str = "bench/divisible";

/// Candidate set `0..n`.
pub fn candidates(n: usize) -> Vec<u64> {
    (0..n as u64).collect()
}

/// Predicate keeping multiples of `d`.
pub fn divisible_by(d: u64) -> Rule<u64> {
    Rule::predicate(move |v: &u64| v % d == 0).named(DIVISIBLE_RULE_NAME)
}

/// Chain that halves the working set `depth` times (multiples of 2, 4, 8, ...).
///
/// Over `0..n` with `2^depth < n` the chain ends with several survivors, so a
/// single-pass reducer exhausts and a tie-break reducer must rank.
pub fn halving_chain(depth: u32) -> Vec<Rule<u64>> {
    (1..=depth).map(|k| divisible_by(1u64 << k)).collect()
}

/// Chain where every rule reverts; measures the cost of walking without
/// narrowing.
pub fn reverting_chain(len: usize) -> Vec<Rule<u64>> {
    (0..len)
        .map(|_| Rule::predicate(|_: &u64| false).named("bench/never"))
        .collect()
}

/// Single-pass reducer over [`halving_chain`].
pub fn halving_reducer(depth: u32) -> Reducer<u64> {
    Reducer::single_pass(halving_chain(depth))
}

/// Tie-break reducer over [`halving_chain`]; the largest survivor wins.
pub fn halving_tie_break(depth: u32) -> Reducer<u64> {
    Reducer::with_comparator(|a: &u64, b: &u64| a.cmp(b), halving_chain(depth))
}

/// Aggregate reducer whose single transform keeps the maximum.
pub fn max_aggregate() -> Reducer<u64> {
    Reducer::aggregate([Rule::transform(|all: &[u64]| {
        all.iter().copied().max().into_iter().collect()
    })
    .named("bench/max")])
}
