//! Reachability state tracking for monitored links.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Outcome of recording a probe result for one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// No prior state existed; baseline recorded silently.
    First,
    /// Same result as the previous cycle.
    Unchanged,
    /// The link flipped between reachable and unreachable.
    Changed { previous: bool },
}

/// Mutex-guarded map of link id to last observed reachability.
///
/// Owned exclusively by the liveness monitor. The map itself is never
/// exposed; [`ReachabilityMap::observe`] performs the whole read-modify-write
/// under the lock, so the critical section covers only the compare and store,
/// never a network probe. State lives in memory only: after a restart every
/// link is observed as new again.
#[derive(Default)]
pub struct ReachabilityMap {
    states: Mutex<HashMap<i64, bool>>,
}

impl ReachabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a probe result and reports how it relates to the prior state.
    pub fn observe(&self, link_id: i64, reachable: bool) -> Observation {
        let mut states = self
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match states.insert(link_id, reachable) {
            None => Observation::First,
            Some(previous) if previous == reachable => Observation::Unchanged,
            Some(previous) => Observation::Changed { previous },
        }
    }

    /// Number of links with a recorded observation.
    pub fn len(&self) -> usize {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_observation_is_silent() {
        let map = ReachabilityMap::new();

        assert_eq!(map.observe(1, true), Observation::First);
        assert_eq!(map.observe(2, false), Observation::First);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_steady_state_is_unchanged() {
        let map = ReachabilityMap::new();

        map.observe(1, true);
        assert_eq!(map.observe(1, true), Observation::Unchanged);
        assert_eq!(map.observe(1, true), Observation::Unchanged);
    }

    #[test]
    fn test_transition_sequence() {
        let map = ReachabilityMap::new();

        // reachable, unreachable, unreachable, reachable: two transitions.
        assert_eq!(map.observe(1, true), Observation::First);
        assert_eq!(map.observe(1, false), Observation::Changed { previous: true });
        assert_eq!(map.observe(1, false), Observation::Unchanged);
        assert_eq!(map.observe(1, true), Observation::Changed { previous: false });
    }

    #[test]
    fn test_links_are_tracked_independently() {
        let map = ReachabilityMap::new();

        map.observe(1, true);
        assert_eq!(map.observe(2, false), Observation::First);
        assert_eq!(map.observe(1, false), Observation::Changed { previous: true });
        assert_eq!(map.observe(2, false), Observation::Unchanged);
    }

    #[test]
    fn test_concurrent_observers_keep_counts_consistent() {
        let map = Arc::new(ReachabilityMap::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let map = map.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        map.observe(t * 100 + i, i % 2 == 0);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.len(), 800);
    }
}
