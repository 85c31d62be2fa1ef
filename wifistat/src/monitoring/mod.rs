//! Periodic re-fetching of status snapshots.
//!
//! This module provides the [`Poller`](poller::Poller) handle that owns the
//! polling task.

pub mod poller;
