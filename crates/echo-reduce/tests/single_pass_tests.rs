// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{
    counting, init_tracing, pass_all, pass_first, pass_none, pass_some, pass_true, tagged,
    tagged_is, Fake, Tagged,
};
use echo_reduce::{ReduceError, Reducer, Rule, Unreducible};

// ─── API ───────────────────────────────────────────────────────────────

#[test]
fn single_valid_element_is_returned_regardless_of_position() {
    init_tracing();
    for input in [[Fake::True, Fake::False], [Fake::False, Fake::True]] {
        let reducer = Reducer::single_pass([pass_true()]);
        assert_eq!(reducer.reduce(input), Ok(Fake::True));
    }
}

#[test]
fn more_than_one_valid_element_fails_with_input_size() {
    let reducer = Reducer::single_pass([pass_true()]);
    let err = reducer.reduce([Fake::True, Fake::True]).unwrap_err();
    match err {
        ReduceError::Unreducible(u) => assert_eq!(u.remains(), 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_input_is_a_precondition_failure() {
    let reducer = Reducer::single_pass([pass_true()]);
    let err = reducer.reduce(Vec::<Fake>::new()).unwrap_err();
    match err {
        ReduceError::Precondition(p) => {
            assert_eq!(p.required(), 1);
            assert_eq!(p.actual(), 0);
            assert_eq!(p.message(), "must not be empty");
        }
        other => panic!("expected precondition failure, got {other:?}"),
    }
}

#[test]
fn empty_input_never_runs_a_rule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reducer = Reducer::single_pass([counting::<Fake>(Arc::clone(&calls), true)]);
    assert!(reducer.reduce([]).unwrap_err().is_precondition());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn lone_element_failing_its_rule_reports_one_remaining() {
    let reducer = Reducer::single_pass([pass_true()]);
    let err = reducer.reduce([Fake::False]).unwrap_err();
    assert_eq!(err, ReduceError::Unreducible(Unreducible::new(1)));
    assert_eq!(
        err.to_string(),
        "Unable to reduce to a single valid element. Remains a single element but it is invalid."
    );
}

#[test]
fn failure_reports_the_narrowed_count_not_the_input_size() {
    let reducer = Reducer::single_pass([pass_some(), pass_true()]);
    let err = reducer
        .reduce([Fake::Some, Fake::False, Fake::Some, Fake::False])
        .unwrap_err();
    assert_eq!(err.remains(), Some(2));
    assert_eq!(
        err.to_string(),
        "Unable to reduce to a single valid element. Remains: `2`."
    );
}

// ─── RULES ─────────────────────────────────────────────────────────────

#[test]
fn single_element_confirmed_by_a_rule_is_returned() {
    let reducer = Reducer::single_pass([pass_all()]);
    assert_eq!(reducer.reduce([Fake::Any]), Ok(Fake::Any));
}

#[test]
fn rule_nobody_passes_leaves_everyone_standing() {
    let reducer = Reducer::single_pass([pass_none()]);
    assert_eq!(reducer.reduce([Fake::Any]).unwrap_err().remains(), Some(1));
    assert_eq!(
        reducer.reduce([Fake::Any, Fake::Any, Fake::Any]).unwrap_err().remains(),
        Some(3)
    );
}

#[test]
fn zero_match_rule_hands_the_untouched_set_to_the_next_rule() {
    let reducer = Reducer::single_pass([pass_none(), pass_first()]);
    let input = tagged(&[Fake::Any, Fake::Any, Fake::Any]);
    let picked = reducer.reduce(input.clone()).unwrap();
    assert!(input.contains(&picked));
    assert_eq!(picked.id, 0);
}

#[test]
fn partial_match_hands_the_narrowed_set_to_the_next_rule() {
    let reducer = Reducer::single_pass([tagged_is(Fake::Some), pass_first()]);
    let picked = reducer
        .reduce(tagged(&[Fake::Any, Fake::Some, Fake::Some, Fake::Any]))
        .unwrap();
    assert_eq!(picked, Tagged { fake: Fake::Some, id: 1 });
}

#[test]
fn progressive_narrowing_over_plain_markers() {
    let reducer = Reducer::single_pass([pass_some(), pass_first()]);
    let picked = reducer.reduce([Fake::Any, Fake::Some, Fake::Some, Fake::Any]);
    assert_eq!(picked, Ok(Fake::Some));
}

#[test]
fn accept_short_circuits_later_rules() {
    let later = Arc::new(AtomicUsize::new(0));
    let reducer = Reducer::single_pass([pass_true(), counting(Arc::clone(&later), true)]);
    assert_eq!(reducer.reduce([Fake::False, Fake::True]), Ok(Fake::True));
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn each_rule_sees_each_working_set_element_once() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let reducer = Reducer::single_pass([
        pass_some(),
        counting(Arc::clone(&first), false),
        counting(Arc::clone(&second), false),
    ]);
    let err = reducer
        .reduce([Fake::Some, Fake::Any, Fake::Some, Fake::Some])
        .unwrap_err();
    assert_eq!(err.remains(), Some(3));
    assert_eq!(first.load(Ordering::SeqCst), 3);
    assert_eq!(second.load(Ordering::SeqCst), 3);
}

#[test]
fn zero_rules_always_fail() {
    let reducer: Reducer<Fake> = Reducer::single_pass([]);
    assert_eq!(
        reducer.reduce([Fake::True, Fake::False]).unwrap_err().remains(),
        Some(2)
    );
}

#[test]
fn iterators_are_accepted_as_candidates() {
    let reducer = Reducer::single_pass([Rule::predicate(|n: &u32| *n == 7)]);
    assert_eq!(reducer.reduce(1..10), Ok(7));

    let names = ["alpha", "beta", "gamma"].map(String::from);
    let reducer = Reducer::single_pass([Rule::predicate(|s: &String| s.starts_with('b'))]);
    assert_eq!(reducer.reduce(names.iter().cloned()), Ok(String::from("beta")));
}

// ─── REUSE ─────────────────────────────────────────────────────────────

#[test]
fn reducer_is_reusable_across_calls() {
    let reducer = Reducer::single_pass([pass_some(), pass_true()]);
    for _ in 0..3 {
        assert_eq!(reducer.reduce([Fake::Any, Fake::Some]), Ok(Fake::Some));
        assert_eq!(
            reducer.reduce([Fake::Some, Fake::Some]).unwrap_err().remains(),
            Some(2)
        );
    }
}

#[test]
fn reducer_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Reducer<Fake>>();

    let reducer = Arc::new(Reducer::single_pass([
        Rule::predicate(|n: &u64| n % 3 == 0),
        Rule::predicate(|n: &u64| n % 5 == 0),
    ]));
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let reducer = Arc::clone(&reducer);
            std::thread::spawn(move || reducer.reduce((t * 100)..(t * 100 + 14)))
        })
        .collect();
    for handle in handles {
        let result = handle.join().unwrap();
        let picked = result.unwrap();
        assert_eq!(picked % 15, 0);
    }
}
