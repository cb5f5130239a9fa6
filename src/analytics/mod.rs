//! Asynchronous click ingestion pipeline.
//!
//! The redirect path must never wait on analytics. Click events flow through
//! a bounded queue into a pool of background workers:
//!
//! 1. [`ClickQueue::submit`] - non-blocking enqueue on the redirect path;
//!    returns `false` instead of blocking when the queue is full
//! 2. [`ClickWorkerPool`] - fixed set of consumers draining the queue and
//!    persisting each event via [`crate::domain::repositories::ClickRepository`]
//!
//! Overload sheds load: a full queue drops the event, counts it, and emits a
//! rate-limited warning. Persistence failures discard the single event and
//! the worker moves on.

pub mod queue;
pub mod worker;

pub use queue::ClickQueue;
pub use worker::ClickWorkerPool;
