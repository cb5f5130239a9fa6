//! Bounded click event queue with a non-blocking producer side.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;

/// Minimum interval between full-queue warnings.
const WARN_INTERVAL: Duration = Duration::from_secs(5);

/// Producer side of the bounded click event channel.
///
/// Shared by all HTTP handlers through [`crate::state::AppState`]. The single
/// receiver is handed to [`crate::analytics::ClickWorkerPool`] at startup.
///
/// # Backpressure
///
/// [`ClickQueue::submit`] never blocks. When the queue is at capacity the
/// event is dropped: under sustained overload losing analytics records is
/// preferred over slowing down redirects. Drops are counted and reported via
/// a rate-limited warning rather than per-event error logs.
///
/// # Shutdown
///
/// [`ClickQueue::close`] drops the sender, after which `submit` returns
/// `false` and workers drain whatever is still queued before exiting.
pub struct ClickQueue {
    tx: Mutex<Option<mpsc::Sender<ClickEvent>>>,
    capacity: usize,
    dropped: AtomicU64,
    last_warn: Mutex<Option<Instant>>,
}

impl ClickQueue {
    /// Creates a queue with the given capacity, returning the producer handle
    /// and the single consumer end.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        let queue = Self {
            tx: Mutex::new(Some(tx)),
            capacity,
            dropped: AtomicU64::new(0),
            last_warn: Mutex::new(None),
        };
        (queue, rx)
    }

    /// Attempts to enqueue a click event without blocking.
    ///
    /// Returns `true` if the event was accepted, `false` if it was dropped
    /// because the queue is full or already closed. Safe to call concurrently
    /// from any number of producers.
    pub fn submit(&self, event: ClickEvent) -> bool {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        let Some(tx) = tx else {
            self.note_drop("queue closed");
            return false;
        };

        match tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.note_drop("queue full");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.note_drop("receiver gone");
                false
            }
        }
    }

    /// Closes the producer side.
    ///
    /// Subsequent [`ClickQueue::submit`] calls return `false`; events already
    /// queued remain available to the workers.
    pub fn close(&self) {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();

        if tx.is_some() {
            tracing::info!(
                dropped = self.dropped(),
                "click queue closed; no further events accepted"
            );
        }
    }

    /// Returns `true` once [`ClickQueue::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_none()
    }

    /// Configured queue capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of events dropped since startup.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Counts a dropped event and emits at most one warning per
    /// [`WARN_INTERVAL`].
    fn note_drop(&self, reason: &'static str) {
        let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
        metrics::counter!("snaplink_clicks_dropped_total").increment(1);

        let mut last_warn = self
            .last_warn
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let due = last_warn.is_none_or(|at| at.elapsed() >= WARN_INTERVAL);
        if due {
            *last_warn = Some(Instant::now());
            tracing::warn!(reason, dropped, "dropping click events");
        }
    }
}
