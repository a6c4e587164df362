#![forbid(unsafe_code)]

//! Immutable undo/redo history container.
//!
//! [`History`] tracks the previous states of an application value and
//! supports bidirectional navigation. Every operation returns a new
//! `History`; the receiver and every previously returned value stay valid
//! and unchanged. The backing sequences are [`im::Vector`]s of
//! [`Arc`]-shared snapshots, so versions share structure and a new version
//! costs O(log n) regardless of how large the stored states are.
//!
//! ```text
//! push(s3)
//! ┌────────────────────────────────────────────────┐
//! │ undos: [s0·1, s1·1, s2·1, s3·1]    (old → new) │
//! │ redos: []                                      │
//! └────────────────────────────────────────────────┘
//!
//! undo(c3), undo(c2)
//! ┌────────────────────────────────────────────────┐
//! │ undos: [s0·1, s1·1]                            │
//! │ redos: [c2·1, c3·1]                (top first) │
//! └────────────────────────────────────────────────┘
//!
//! push(s4) — new branch, clears redos
//! ┌────────────────────────────────────────────────┐
//! │ undos: [s0·1, s1·1, s4·1]                      │
//! │ redos: []                                      │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! `sN·w` is a snapshot with merge weight `w`. Weights stay at 1 until the
//! smooth pruning strategy starts folding entries together; see the
//! [`strategy`](crate::strategy) module.
//!
//! # Invariants
//!
//! 1. `undo_depth() <= config.max_undos` immediately after every
//!    [`push`](History::push); never re-checked on undo/redo.
//! 2. [`push`](History::push) clears the redo side.
//! 3. Every merge weight is at least 1; smooth pruning conserves the total
//!    weight of the undo side exactly.
//! 4. No operation mutates the receiver.
//!
//! # Merge-weight carrying
//!
//! The container remembers one pending weight (`carried_weight`): the weight
//! the next inserted snapshot will get. A fresh history carries 1; `undo`
//! and `redo` replace it with the weight of the snapshot they consume, so
//! navigating back and forth never loses merge accounting. The LRU strategy
//! never reads weights, but the bookkeeping is identical under both
//! strategies.

use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::config::{ConfigError, HistoryConfig};
use crate::snapshot::Snapshot;

/// Immutable undo/redo history of opaque states.
///
/// `T` is fully opaque: the container stores, returns, and shares states but
/// never inspects, compares, or clones them. All operations take `&self` and
/// return a new `History`.
pub struct History<T> {
    /// Previous states, oldest first; the back is "current minus one".
    pub(crate) undos: Vector<Snapshot<T>>,
    /// Undone states; the front is the one closest to current.
    pub(crate) redos: Vector<Snapshot<T>>,
    /// Merge weight attached to the next inserted snapshot.
    pub(crate) merged: u64,
    pub(crate) config: HistoryConfig,
}

impl<T> History<T> {
    /// Creates an empty history with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `config.max_undos` is 0.
    pub fn new(config: HistoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            undos: Vector::new(),
            redos: Vector::new(),
            merged: 1,
            config,
        })
    }

    /// Creates an empty history with the default configuration (capacity
    /// [`DEFAULT_MAX_UNDOS`](crate::DEFAULT_MAX_UNDOS), LRU pruning).
    #[must_use]
    pub fn with_default_config() -> Self {
        Self {
            undos: Vector::new(),
            redos: Vector::new(),
            merged: 1,
            config: HistoryConfig::default(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether there is a previous state to step back to.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    /// Whether there is an undone state to step forward to.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    /// The most recent previous state, or `None` when there is nothing to
    /// undo.
    #[must_use]
    pub fn previous(&self) -> Option<&T> {
        self.undos.back().map(Snapshot::value)
    }

    /// The most recently undone state, or `None` when there is nothing to
    /// redo.
    #[must_use]
    pub fn next(&self) -> Option<&T> {
        self.redos.front().map(Snapshot::value)
    }

    /// Number of entries on the undo side.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undos.len()
    }

    /// Number of entries on the redo side.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redos.len()
    }

    /// Whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undos.is_empty() && self.redos.is_empty()
    }

    /// Total merge weight of the undo side.
    ///
    /// Under the smooth strategy this equals the number of pushes the undo
    /// side represents: pruning folds weights together instead of dropping
    /// them.
    #[must_use]
    pub fn undo_weight(&self) -> u64 {
        self.undos.iter().map(Snapshot::merged).sum()
    }

    /// Merge weight the next inserted snapshot will carry.
    #[must_use]
    pub fn carried_weight(&self) -> u64 {
        self.merged
    }

    /// Read-only view of the undo sequence, oldest first.
    #[must_use]
    pub fn undos(&self) -> &Vector<Snapshot<T>> {
        &self.undos
    }

    /// Read-only view of the redo stack, top (closest to current) first.
    #[must_use]
    pub fn redos(&self) -> &Vector<Snapshot<T>> {
        &self.redos
    }

    /// The configuration this history was created with.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Records `state` as the newest previous state.
    ///
    /// Clears the redo side (a push starts a new branch), resets the carried
    /// weight to 1, and prunes once if the undo side now exceeds capacity.
    #[must_use]
    pub fn push(&self, state: T) -> Self {
        let mut next = self.clone();
        next.undos
            .push_back(Snapshot::new(Arc::new(state), self.merged));
        next.redos.clear();
        next.merged = 1;
        next.prune()
    }

    /// Steps back one state.
    ///
    /// Removes the newest undo entry and records `current` — the caller's
    /// live state — on the redo side. The removed entry's merge weight
    /// becomes the carried weight. Returns an unchanged copy when there is
    /// nothing to undo; callers that need the restored state read
    /// [`previous`](History::previous) before calling.
    #[must_use]
    pub fn undo(&self, current: T) -> Self {
        let mut next = self.clone();
        let Some(restored) = next.undos.pop_back() else {
            return next;
        };
        next.redos
            .push_front(Snapshot::new(Arc::new(current), self.merged));
        next.merged = restored.merged();
        next
    }

    /// Steps forward one state.
    ///
    /// Pops the top redo entry and records `current` on the undo side. The
    /// popped entry's merge weight becomes the carried weight. Returns an
    /// unchanged copy when there is nothing to redo; callers that need the
    /// restored state read [`next`](History::next) before calling.
    #[must_use]
    pub fn redo(&self, current: T) -> Self {
        let mut next = self.clone();
        let Some(restored) = next.redos.pop_front() else {
            return next;
        };
        next.undos
            .push_back(Snapshot::new(Arc::new(current), self.merged));
        next.merged = restored.merged();
        next
    }

    /// Applies the configured pruning strategy if the undo side is over
    /// capacity, removing exactly one entry; otherwise returns an unchanged
    /// copy.
    ///
    /// `push` calls this once per push, so the undo side is never more than
    /// one entry over capacity when a strategy runs.
    #[must_use]
    pub fn prune(&self) -> Self {
        if self.undos.len() <= self.config.max_undos {
            return self.clone();
        }
        tracing::trace!(
            depth = self.undos.len(),
            max_undos = self.config.max_undos,
            strategy = ?self.config.strategy,
            "undo sequence over capacity, pruning one entry"
        );
        self.config.strategy.prune_one(self)
    }

    /// Empty history with the same configuration.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self {
            undos: Vector::new(),
            redos: Vector::new(),
            merged: 1,
            config: self.config.clone(),
        }
    }
}

impl<T> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            undos: self.undos.clone(),
            redos: self.redos.clone(),
            merged: self.merged,
            config: self.config.clone(),
        }
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_depth", &self.undos.len())
            .field("redo_depth", &self.redos.len())
            .field("carried_weight", &self.merged)
            .field("config", &self.config)
            .finish()
    }
}
