// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use echo_reduce::Rule;

// =============================================================================
// FIXTURE CANDIDATES
// =============================================================================

/// Marker candidates. Equality is by marker only; use [`Tagged`] when a test
/// must tell two equal markers apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fake {
    True,
    False,
    Some,
    Any,
}

/// A marker plus its position in the input, for identity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tagged {
    pub fake: Fake,
    pub id: usize,
}

/// Tag each marker with its input position.
pub fn tagged(fakes: &[Fake]) -> Vec<Tagged> {
    fakes
        .iter()
        .enumerate()
        .map(|(id, fake)| Tagged { fake: *fake, id })
        .collect()
}

// =============================================================================
// RULES
// =============================================================================

pub fn pass_true() -> Rule<Fake> {
    Rule::predicate(|f: &Fake| *f == Fake::True).named("pass-true")
}

pub fn pass_some() -> Rule<Fake> {
    Rule::predicate(|f: &Fake| *f == Fake::Some).named("pass-some")
}

pub fn pass_all<E: 'static>() -> Rule<E> {
    Rule::predicate(|_: &E| true).named("pass-all")
}

pub fn pass_none<E: 'static>() -> Rule<E> {
    Rule::predicate(|_: &E| false).named("pass-none")
}

/// Stateful rule: true for the very first element it is ever asked about,
/// false afterwards.
pub fn pass_first<E: 'static>() -> Rule<E> {
    let calls = AtomicUsize::new(0);
    Rule::predicate(move |_: &E| calls.fetch_add(1, Ordering::SeqCst) == 0).named("pass-first")
}

/// Predicate rule that counts its invocations into `counter`.
pub fn counting<E: 'static>(counter: Arc<AtomicUsize>, verdict: bool) -> Rule<E> {
    Rule::predicate(move |_: &E| {
        counter.fetch_add(1, Ordering::SeqCst);
        verdict
    })
    .named("counting")
}

pub fn tagged_is(fake: Fake) -> Rule<Tagged> {
    Rule::predicate(move |t: &Tagged| t.fake == fake).named("tagged-is")
}

// =============================================================================
// LOGGING
// =============================================================================

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("echo_reduce=trace"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
