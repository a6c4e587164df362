#![forbid(unsafe_code)]

//! Palimpsest
//!
//! An immutable, persistent undo/redo history container. A [`History`]
//! tracks a sequence of opaque application states, supports stepping
//! backward and forward through them, and enforces a maximum size with a
//! configurable pruning strategy. Every operation returns a new `History`
//! and leaves the receiver untouched; versions share structure through
//! [`im::Vector`] and [`std::sync::Arc`].
//!
//! # Key Components
//!
//! - [`History`] - The container: push/undo/redo/prune plus derived queries
//! - [`HistoryConfig`] - Capacity and strategy configuration
//! - [`PruneStrategy`] - Selects [`lru`] (drop the oldest entry) or
//!   [`smooth`] (fold entries together, conserving merge weight)
//! - [`Snapshot`] - A stored state paired with its merge weight
//! - [`linear()`] - Two-point interpolation, the smooth strategy's curve
//!
//! # Quick Start
//!
//! ```
//! use palimpsest::{History, HistoryConfig, PruneStrategy};
//!
//! let config = HistoryConfig::new(100).with_strategy(PruneStrategy::Smooth);
//! let history = History::new(config)?;
//!
//! // Record two states, then step back.
//! let history = history.push("draft-1").push("draft-2");
//! assert_eq!(history.previous(), Some(&"draft-2"));
//!
//! let history = history.undo("draft-3");
//! assert_eq!(history.previous(), Some(&"draft-1"));
//! assert_eq!(history.next(), Some(&"draft-3"));
//! # Ok::<(), palimpsest::ConfigError>(())
//! ```
//!
//! # Choosing a strategy
//!
//! [`PruneStrategy::Lru`] drops the oldest entry when capacity is exceeded:
//! the retained window is exactly the most recent `max_undos` pushes.
//! [`PruneStrategy::Smooth`] instead folds an entry into its older
//! neighbor, so old history thins out gradually while the initial state and
//! the total merge weight survive. See the [`strategy`] module docs for the
//! selection rule.

pub mod config;
pub mod history;
pub mod linear;
pub mod snapshot;
pub mod strategy;

pub use config::{ConfigError, DEFAULT_MAX_UNDOS, HistoryConfig};
pub use history::History;
pub use linear::{Point, linear};
pub use snapshot::Snapshot;
pub use strategy::{PruneStrategy, lru, smooth};

/// Persistent sequence backing the undo and redo sides, re-exported so
/// callers can name it without a direct `im` dependency.
pub use im::Vector;
