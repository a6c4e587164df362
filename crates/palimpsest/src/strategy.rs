#![forbid(unsafe_code)]

//! Capacity-management strategies for the undo sequence.
//!
//! When a push leaves the undo sequence one entry over capacity,
//! [`History::prune`](crate::History::prune) dispatches to the configured
//! strategy, which removes exactly one entry:
//!
//! - [`lru`] drops the oldest entry outright, value and weight.
//! - [`smooth`] folds an entry into its older neighbor. The total merge
//!   weight of the sequence is conserved; what is lost is one distinct
//!   value, and the loss rate grows toward the old end of the sequence.
//!
//! # How smooth picks its target
//!
//! ```text
//! weight                                 curve through the endpoint weights
//!   9 ·  ●                    undos[0], weight 9
//!   7 ·     ·
//!   5 ·        ·
//!   3 ·           ●           undos[1] sits below the curve → receives
//!   1 ·              ●  ●     undos[2] is folded into undos[1]
//!      ─────────────────────
//!       old    →    new
//! ```
//!
//! Entries are scanned oldest to newest against a line through the newest
//! and oldest weights; the first entry whose weight falls short of the line
//! at its position has not yet absorbed its share of merges, so its newer
//! neighbor is folded into it. When every entry sits on or above the line,
//! the oldest entry receives the fold. The oldest entry is never deleted,
//! only merged into, so the initial state's value survives as long as the
//! sequence does.

use crate::history::History;
use crate::linear::{Point, linear};

/// Strategy applied when the undo sequence exceeds capacity.
///
/// Held in [`HistoryConfig`](crate::HistoryConfig); each variant selects one
/// of the free functions in this module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PruneStrategy {
    /// Drop the oldest undo entry ([`lru`]).
    #[default]
    Lru,
    /// Fold an entry into its older neighbor, conserving total merge weight
    /// ([`smooth`]).
    Smooth,
}

impl PruneStrategy {
    pub(crate) fn prune_one<T>(self, history: &History<T>) -> History<T> {
        match self {
            Self::Lru => lru(history),
            Self::Smooth => smooth(history),
        }
    }
}

/// Drops the single oldest undo entry.
///
/// The dropped state's value and merge weight are discarded permanently.
/// A history with no undo entries is returned unchanged.
#[must_use]
pub fn lru<T>(history: &History<T>) -> History<T> {
    let mut pruned = history.clone();
    let _ = pruned.undos.pop_front();
    pruned
}

/// Folds one undo entry into its older neighbor, conserving total weight.
///
/// See the module docs for how the receiving entry is chosen. A history
/// with fewer than two undo entries is returned unchanged (the weighting
/// curve needs two distinct endpoints).
#[must_use]
pub fn smooth<T>(history: &History<T>) -> History<T> {
    let n = history.undos.len();
    if n < 2 {
        return history.clone();
    }

    let min_merge = history.undos[n - 1].merged() as f64;
    let max_merge = history.undos[0].merged() as f64;
    let curve = linear(
        Point::new(0.0, min_merge),
        Point::new((n - 1) as f64, max_merge),
    );

    // First entry, oldest to newest, whose weight falls strictly below the
    // curve at its mirrored position. The newest entry never qualifies: the
    // curve there equals its own weight and the comparison is strict.
    let receiving = (0..n)
        .find(|&i| (history.undos[i].merged() as f64) < curve((n - 1 - i) as f64))
        .unwrap_or(0);
    let absorbed = receiving + 1;
    tracing::trace!(receiving, absorbed, "folding snapshot into older neighbor");

    let mut pruned = history.clone();
    let removed = pruned.undos.remove(absorbed);
    let folded = pruned.undos[receiving].absorb(removed.merged());
    let _ = pruned.undos.set(receiving, folded);
    pruned
}
