//! Click ingestion worker pool.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<ClickEvent>>>;

/// Fixed pool of workers draining the click event queue.
///
/// Each worker loops on the shared receiver: dequeue one event, persist it,
/// move on. A failed insert discards that single event; the worker keeps
/// running. Workers exit only once the queue is closed and fully drained,
/// so clicks accepted before shutdown are not lost.
///
/// Events for the same link may be persisted out of temporal order when
/// picked up by different workers; clicks are independent analytics facts,
/// not a sequential log.
pub struct ClickWorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl ClickWorkerPool {
    /// Spawns `worker_count` workers consuming from `receiver`.
    pub fn spawn(
        receiver: mpsc::Receiver<ClickEvent>,
        clicks: Arc<dyn ClickRepository>,
        worker_count: usize,
    ) -> Self {
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));

        let handles = (0..worker_count)
            .map(|worker_id| {
                let receiver = receiver.clone();
                let clicks = clicks.clone();
                tokio::spawn(run_worker(worker_id, receiver, clicks))
            })
            .collect();

        tracing::info!(worker_count, "click workers started");

        Self { handles }
    }

    /// Number of workers in the pool.
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to finish.
    ///
    /// Workers finish once the queue is closed and drained; call
    /// [`crate::analytics::ClickQueue::close`] first.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "click worker task failed");
            }
        }
        tracing::info!("click workers stopped");
    }
}

async fn run_worker(worker_id: usize, receiver: SharedReceiver, clicks: Arc<dyn ClickRepository>) {
    tracing::debug!(worker_id, "click worker started");

    loop {
        // Hold the receiver lock only while waiting for the next event,
        // never across the database write.
        let event = { receiver.lock().await.recv().await };

        match event {
            Some(event) => process_event(worker_id, clicks.as_ref(), event).await,
            None => break,
        }
    }

    tracing::debug!(worker_id, "click worker stopped");
}

/// Persists a single click event.
///
/// The producer timestamp is preserved when present; otherwise the worker
/// stamps the click with its own wall clock.
async fn process_event(worker_id: usize, clicks: &dyn ClickRepository, event: ClickEvent) {
    let link_id = event.link_id;

    let new_click = NewClick {
        link_id,
        clicked_at: event.occurred_at.unwrap_or_else(Utc::now),
        user_agent: event.user_agent,
        ip: event.ip,
    };

    match clicks.create(new_click).await {
        Ok(_) => {
            metrics::counter!("snaplink_clicks_persisted_total").increment(1);
            tracing::debug!(worker_id, link_id, "click persisted");
        }
        Err(e) => {
            metrics::counter!("snaplink_clicks_failed_total").increment(1);
            tracing::warn!(worker_id, link_id, error = %e, "failed to persist click; event discarded");
        }
    }
}
