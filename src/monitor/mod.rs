//! Periodic liveness monitoring of link destinations.
//!
//! A single background task probes every stored link on a fixed interval and
//! logs a structured notification whenever a destination flips between
//! reachable and unreachable. The first observation of a link only records a
//! baseline; steady state is silent.
//!
//! Cycles never overlap: each cycle runs to completion before the next tick
//! fires, so observations for one link are strictly sequential.

pub mod probe;
pub mod status;

pub use probe::Prober;
pub use status::{Observation, ReachabilityMap};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Liveness monitor settings.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between check cycles.
    pub interval: Duration,
    /// Per-probe timeout.
    pub probe_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Summary of one completed check cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Links probed this cycle.
    pub checked: usize,
    /// Links observed for the first time (no notification).
    pub baselines: usize,
    /// Links whose reachability flipped (one notification each).
    pub transitions: usize,
}

/// Periodic driver that probes all stored links and tracks transitions.
///
/// Owns the [`ReachabilityMap`]; probes run outside its lock so checks for
/// different links never serialize on each other's network latency. State is
/// in-memory only: after a restart the first cycle re-establishes baselines
/// for every link.
pub struct LinkMonitor {
    links: Arc<dyn LinkRepository>,
    prober: Prober,
    interval: Duration,
    states: ReachabilityMap,
}

impl LinkMonitor {
    /// Builds a monitor over the given link reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe HTTP client cannot be constructed.
    pub fn new(links: Arc<dyn LinkRepository>, config: MonitorConfig) -> Result<Self> {
        Ok(Self {
            links,
            prober: Prober::new(config.probe_timeout)?,
            interval: config.interval,
            states: ReachabilityMap::new(),
        })
    }

    /// Runs check cycles until `shutdown` is cancelled.
    ///
    /// The first cycle starts immediately; subsequent cycles fire once per
    /// configured interval. Cancellation is observed between cycles and
    /// during the timer wait; an in-flight probe ends via its own timeout.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "liveness monitor started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("liveness monitor stopped");
                    return;
                }
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(report) => tracing::debug!(
                            checked = report.checked,
                            baselines = report.baselines,
                            transitions = report.transitions,
                            "liveness cycle finished"
                        ),
                        Err(e) => tracing::warn!(
                            error = %e,
                            "liveness cycle aborted; link listing failed"
                        ),
                    }
                }
            }
        }
    }

    /// Performs one full check cycle.
    ///
    /// Fetches the current link set, probes each destination, and records
    /// each observation. A listing failure aborts the whole cycle; probe
    /// failures only mark the individual link unreachable.
    ///
    /// # Errors
    ///
    /// Returns the link reader's error; no observations are recorded in that
    /// case.
    pub async fn run_cycle(&self) -> Result<CycleReport, AppError> {
        let links = self.links.list_all().await?;

        let mut report = CycleReport {
            checked: links.len(),
            ..CycleReport::default()
        };

        for link in &links {
            let reachable = self.prober.is_reachable(&link.long_url).await;

            match self.states.observe(link.id, reachable) {
                Observation::First => {
                    report.baselines += 1;
                    tracing::debug!(
                        link_id = link.id,
                        code = %link.code,
                        url = %link.long_url,
                        reachable,
                        "initial reachability recorded"
                    );
                }
                Observation::Unchanged => {}
                Observation::Changed { previous } => {
                    report.transitions += 1;
                    metrics::counter!("snaplink_monitor_transitions_total").increment(1);
                    tracing::info!(
                        link_id = link.id,
                        code = %link.code,
                        url = %link.long_url,
                        previous,
                        current = reachable,
                        "link reachability changed"
                    );
                }
            }
        }

        Ok(report)
    }

    /// Number of links with a recorded baseline.
    pub fn tracked_links(&self) -> usize {
        self.states.len()
    }
}
