//! Periodic snapshot polling.
//!
//! A [`Poller`] owns a background task that fetches a snapshot immediately,
//! then once per interval, and on every accepted [`Poller::refresh`]. Each
//! result replaces the previous one in a `watch` channel.
//!
//! At most one fetch is in flight. A tick or refresh that arrives while a
//! fetch is running is dropped rather than queued, and the interval restarts
//! after each fetch. The interval is clamped to between one second and one
//! day.

use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::models::ConnectivitySnapshot;
use crate::core::aggregator::Aggregator;
use crate::types::constants::timeouts;

/// The latest state published by a [`Poller`].
#[derive(Debug, Clone, PartialEq)]
pub enum PollUpdate {
    /// No fetch has completed yet.
    Pending,
    /// The most recent fetch produced this snapshot.
    Snapshot(ConnectivitySnapshot),
    /// The most recent fetch could not read the network state.
    Unavailable(String),
}

/// Handle to a running polling task.
///
/// The task stops when [`stop`](Self::stop) is called or the handle is
/// dropped. Must be created inside a tokio runtime.
///
/// # Example
///
/// ```no_run
/// use wifistat::{PollUpdate, WifiStatus};
///
/// # async fn example() -> wifistat::Result<()> {
/// let status = WifiStatus::new().await?;
/// let poller = status.watch();
/// let mut updates = poller.subscribe();
///
/// while updates.changed().await.is_ok() {
///     if let PollUpdate::Snapshot(snapshot) = &*updates.borrow() {
///         println!("{:?}", snapshot.ssid);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Poller {
    updates: watch::Receiver<PollUpdate>,
    refresh_tx: mpsc::Sender<()>,
    in_flight: Arc<AtomicBool>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Poller {
    /// Starts polling `aggregator` every `interval`.
    ///
    /// The first fetch starts immediately. `interval` is clamped to between
    /// one second and one day.
    pub fn start(aggregator: Aggregator, interval: Duration) -> Self {
        let clamped = timeouts::clamp_poll_interval(interval);
        if clamped != interval {
            warn!("Poll interval {interval:?} out of range, using {clamped:?}");
        }
        let interval = clamped;

        let (updates_tx, updates) = watch::channel(PollUpdate::Pending);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let in_flight = Arc::new(AtomicBool::new(false));
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run(
            aggregator,
            interval,
            updates_tx,
            refresh_rx,
            in_flight.clone(),
            cancel.clone(),
        ));

        debug!("Started polling every {interval:?}");

        Self {
            updates,
            refresh_tx,
            in_flight,
            cancel,
            task: Some(task),
            interval,
        }
    }

    /// The interval the task actually polls at.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns a receiver that observes every published update.
    pub fn subscribe(&self) -> watch::Receiver<PollUpdate> {
        self.updates.clone()
    }

    /// Returns the most recently published update.
    pub fn latest(&self) -> PollUpdate {
        self.updates.borrow().clone()
    }

    /// Whether a fetch is currently running.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Requests an immediate fetch.
    ///
    /// Returns `false` when the request was dropped because a fetch is
    /// already in flight or another refresh is already pending.
    pub fn refresh(&self) -> bool {
        if self.is_fetching() {
            debug!("Fetch in flight, ignoring refresh");
            return false;
        }
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stops the polling task and waits for it to exit.
    ///
    /// A fetch in flight is abandoned.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Polling task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    aggregator: Aggregator,
    interval: Duration,
    updates: watch::Sender<PollUpdate>,
    mut refresh_rx: mpsc::Receiver<()>,
    in_flight: Arc<AtomicBool>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => debug!("Poll interval elapsed"),
            Some(()) = refresh_rx.recv() => debug!("Manual refresh requested"),
        }

        in_flight.store(true, Ordering::Release);
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                in_flight.store(false, Ordering::Release);
                break;
            }
            result = aggregator.fetch_snapshot() => result,
        };

        // Triggers that arrived during the fetch are dropped
        while refresh_rx.try_recv().is_ok() {}
        ticker.reset();
        in_flight.store(false, Ordering::Release);

        let update = match result {
            Ok(snapshot) => PollUpdate::Snapshot(snapshot),
            Err(e) => PollUpdate::Unavailable(e.to_string()),
        };
        updates.send_replace(update);
    }

    debug!("Polling stopped");
}
