#![forbid(unsafe_code)]

//! Property tests for [`History`] invariants.
//!
//! Validates:
//! - The capacity bound holds after every operation, under both strategies.
//! - Push always clears the redo side.
//! - Smooth pruning conserves the total merge weight exactly.
//! - Merge weights never drop below 1.
//! - Undo followed by redo restores the undo side exactly.
//! - No operation mutates the receiver.

use proptest::prelude::*;

use palimpsest::{History, HistoryConfig, PruneStrategy};

// ============================================================================
// Strategy helpers
// ============================================================================

/// Operations that can be performed on a History.
#[derive(Debug, Clone)]
enum Op {
    Push(i64),
    Undo(i64),
    Redo(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i64>().prop_map(Op::Push),
        2 => any::<i64>().prop_map(Op::Undo),
        2 => any::<i64>().prop_map(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn prune_strategy() -> impl Strategy<Value = PruneStrategy> {
    prop_oneof![Just(PruneStrategy::Lru), Just(PruneStrategy::Smooth)]
}

fn apply(history: &History<i64>, op: &Op) -> History<i64> {
    match op {
        Op::Push(v) => history.push(*v),
        Op::Undo(v) => history.undo(*v),
        Op::Redo(v) => history.redo(*v),
    }
}

// ============================================================================
// Invariant 1: capacity bound holds after every operation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn capacity_bound_always_holds(
        max_undos in 1usize..20,
        strategy in prune_strategy(),
        ops in ops_strategy(100)
    ) {
        let config = HistoryConfig::new(max_undos).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");

        for op in &ops {
            history = apply(&history, op);
            prop_assert!(
                history.undo_depth() <= max_undos,
                "undo_depth {} exceeds max_undos {} after {:?}",
                history.undo_depth(), max_undos, op
            );
        }
    }
}

// ============================================================================
// Invariant 2: push always clears the redo side
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn push_always_clears_redos(
        strategy in prune_strategy(),
        ops in ops_strategy(80)
    ) {
        let config = HistoryConfig::new(8).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");

        for op in &ops {
            history = apply(&history, op);
            if let Op::Push(_) = op {
                prop_assert_eq!(history.redo_depth(), 0, "redos not cleared by push");
            }
        }
    }
}

// ============================================================================
// Invariant 3: smooth pruning conserves total merge weight
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn smooth_conserves_push_count(
        max_undos in 1usize..20,
        pushes in prop::collection::vec(any::<i64>(), 1..200)
    ) {
        let config = HistoryConfig::new(max_undos).with_strategy(PruneStrategy::Smooth);
        let mut history = History::new(config).expect("valid config");

        for v in &pushes {
            history = history.push(*v);
        }

        prop_assert_eq!(history.undo_weight(), pushes.len() as u64);
    }
}

// ============================================================================
// Invariant 4: merge weights never drop below 1
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn merge_weights_stay_positive(
        max_undos in 1usize..10,
        strategy in prune_strategy(),
        ops in ops_strategy(120)
    ) {
        let config = HistoryConfig::new(max_undos).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");

        for op in &ops {
            history = apply(&history, op);
            prop_assert!(history.carried_weight() >= 1);
            prop_assert!(
                history.undos().iter().chain(history.redos().iter()).all(|s| s.merged() >= 1),
                "merge weight below 1 after {:?}", op
            );
        }
    }
}

// ============================================================================
// Invariant 5: undo then redo restores the undo side exactly
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn undo_then_redo_restores_the_undo_side(
        strategy in prune_strategy(),
        pushes in prop::collection::vec(any::<i64>(), 1..40),
        current in any::<i64>()
    ) {
        let config = HistoryConfig::new(16).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");
        for v in &pushes {
            history = history.push(*v);
        }

        let restored = *history.previous().expect("at least one push");
        let round_tripped = history.undo(current).redo(restored);

        prop_assert_eq!(round_tripped.undos(), history.undos());
        prop_assert_eq!(round_tripped.redo_depth(), 0);
        prop_assert_eq!(round_tripped.carried_weight(), history.carried_weight());
    }
}

// ============================================================================
// Invariant 6: operations never mutate the receiver
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn operations_never_mutate_the_receiver(
        strategy in prune_strategy(),
        setup in ops_strategy(40),
        op in op_strategy()
    ) {
        let config = HistoryConfig::new(8).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");
        for o in &setup {
            history = apply(&history, o);
        }

        let undos_before = history.undos().clone();
        let redos_before = history.redos().clone();
        let carried_before = history.carried_weight();

        let _derived = apply(&history, &op);

        prop_assert_eq!(history.undos(), &undos_before);
        prop_assert_eq!(history.redos(), &redos_before);
        prop_assert_eq!(history.carried_weight(), carried_before);
    }
}

// ============================================================================
// Invariant 7: navigation queries agree with depths
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn navigation_queries_agree_with_depths(
        strategy in prune_strategy(),
        ops in ops_strategy(80)
    ) {
        let config = HistoryConfig::new(8).with_strategy(strategy);
        let mut history = History::new(config).expect("valid config");

        for op in &ops {
            history = apply(&history, op);
            prop_assert_eq!(history.can_undo(), history.undo_depth() > 0);
            prop_assert_eq!(history.can_redo(), history.redo_depth() > 0);
            prop_assert_eq!(history.previous().is_some(), history.can_undo());
            prop_assert_eq!(history.next().is_some(), history.can_redo());
        }
    }
}

// ============================================================================
// Invariant 8: lru retains exactly the most recent window
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn lru_window_is_the_most_recent_pushes(
        max_undos in 1usize..30,
        pushes in prop::collection::vec(any::<i64>(), 1..120)
    ) {
        let config = HistoryConfig::new(max_undos);
        let mut history = History::new(config).expect("valid config");
        for v in &pushes {
            history = history.push(*v);
        }

        let expected: Vec<i64> = pushes
            .iter()
            .copied()
            .skip(pushes.len().saturating_sub(max_undos))
            .collect();
        let actual: Vec<i64> = history.undos().iter().map(|s| *s.value()).collect();
        prop_assert_eq!(actual, expected);
    }
}
