#![allow(dead_code)]

//! In-memory repository doubles and state builders shared by integration
//! tests. No database is required: the doubles implement the domain traits
//! over mutex-guarded vectors.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;

use snaplink::analytics::ClickQueue;
use snaplink::application::services::{LinkService, StatsService};
use snaplink::domain::click_event::ClickEvent;
use snaplink::domain::entities::{Click, Link, NewClick, NewLink};
use snaplink::domain::repositories::{ClickRepository, LinkRepository};
use snaplink::error::AppError;
use snaplink::state::AppState;

/// In-memory [`LinkRepository`] backed by a `Vec`.
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
    fail_listings: AtomicU32,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_listings: AtomicU32::new(0),
        }
    }

    /// Makes the next `count` calls to `list_all` fail.
    pub fn fail_next_listings(&self, count: u32) {
        self.fail_listings.store(count, Ordering::SeqCst);
    }

    /// Inserts a link directly, bypassing code generation.
    pub fn insert(&self, code: &str, long_url: &str) -> Link {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let link = Link::new(id, code.to_string(), long_url.to_string(), Utc::now());
        self.links.lock().unwrap().push(link.clone());
        link
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": new_link.code }),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let link = Link::new(id, new_link.code, new_link.long_url, Utc::now());
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.long_url == long_url)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let pending = self.fail_listings.load(Ordering::SeqCst);
        if pending > 0 {
            self.fail_listings.store(pending - 1, Ordering::SeqCst);
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(self.links.lock().unwrap().clone())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}

/// In-memory [`ClickRepository`] backed by a `Vec`.
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<Click>>,
    next_id: AtomicI64,
    fail_creates: AtomicU32,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self {
            clicks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_creates: AtomicU32::new(0),
        }
    }

    /// Makes the next `count` calls to `create` fail.
    pub fn fail_next_creates(&self, count: u32) {
        self.fail_creates.store(count, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<Click> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn count_for(&self, link_id: i64) -> usize {
        self.clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .count()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let pending = self.fail_creates.load(Ordering::SeqCst);
        if pending > 0 {
            self.fail_creates.store(pending - 1, Ordering::SeqCst);
            return Err(AppError::internal("Database error", json!({})));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let click = Click {
            id,
            link_id: new_click.link_id,
            clicked_at: new_click.clicked_at,
            user_agent: new_click.user_agent,
            ip: new_click.ip,
        };
        self.clicks.lock().unwrap().push(click.clone());
        Ok(click)
    }

    async fn count_by_link(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .count() as i64)
    }
}

/// Application state wired to in-memory repositories.
pub struct TestApp {
    pub state: AppState,
    pub click_rx: mpsc::Receiver<ClickEvent>,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
}

/// Builds an [`AppState`] over fresh in-memory repositories.
///
/// The click queue's receiver is returned so tests can assert on submitted
/// events without running a worker pool.
pub fn test_app() -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());

    let (queue, click_rx) = ClickQueue::bounded(100);

    let link_repo: Arc<dyn LinkRepository> = links.clone();
    let click_repo: Arc<dyn ClickRepository> = clicks.clone();

    let state = AppState::new(
        Arc::new(LinkService::new(link_repo.clone())),
        Arc::new(StatsService::new(link_repo, click_repo)),
        Arc::new(queue),
        "http://localhost:3000".to_string(),
    );

    TestApp {
        state,
        click_rx,
        links,
        clicks,
    }
}
