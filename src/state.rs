use std::sync::Arc;

use crate::analytics::ClickQueue;
use crate::application::services::{LinkService, StatsService};

/// Shared application state injected into all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    /// Producer handle of the click ingestion pipeline. `submit` is
    /// non-blocking and safe to call from any number of request handlers.
    pub clicks: Arc<ClickQueue>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        stats_service: Arc<StatsService>,
        clicks: Arc<ClickQueue>,
        base_url: String,
    ) -> Self {
        Self {
            link_service,
            stats_service,
            clicks,
            base_url,
        }
    }
}
