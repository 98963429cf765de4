//! Request scheduling for the crawl
//!
//! This module handles:
//! - Global concurrency limiting via a shared semaphore
//! - A fixed politeness delay between sequential requests of one task
//!
//! There is no adaptive backoff: the delay is constant for the whole run.

use crate::config::CrawlerConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A granted request slot; the slot is released when this is dropped
pub struct RequestPermit {
    _permit: OwnedSemaphorePermit,
}

/// Scheduler shared by every state task
///
/// The scheduler coordinates:
/// - Global concurrency limits (max concurrent requests in flight)
/// - The fixed delay each task waits between its own requests
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,

    /// Minimum time between two requests issued by the same task
    request_delay: Duration,
}

impl Scheduler {
    /// Creates a new scheduler from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            global_semaphore: Arc::new(Semaphore::new(config.max_concurrent_requests as usize)),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }

    /// Creates a pacer for one task
    ///
    /// Each state task owns its pacer; the semaphore behind it is shared.
    pub fn pacer(&self) -> Pacer {
        Pacer {
            semaphore: self.global_semaphore.clone(),
            request_delay: self.request_delay,
            last_request_time: None,
        }
    }

    /// Returns the number of request slots currently free
    pub fn available_permits(&self) -> usize {
        self.global_semaphore.available_permits()
    }

    /// Returns the configured politeness delay
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }
}

/// Per-task request pacing
#[derive(Debug)]
pub struct Pacer {
    semaphore: Arc<Semaphore>,
    request_delay: Duration,
    last_request_time: Option<Instant>,
}

impl Pacer {
    /// Waits until this task may issue its next request
    ///
    /// Sleeps out the remainder of the politeness delay, then acquires a global
    /// slot. Returns `None` only if the semaphore was closed, which the crawl
    /// never does; callers proceed without a slot in that case.
    pub async fn acquire(&mut self) -> Option<RequestPermit> {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!("Pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }

        let permit = self.semaphore.clone().acquire_owned().await.ok()?;
        self.last_request_time = Some(Instant::now());
        Some(RequestPermit { _permit: permit })
    }

    /// Returns how long this task must still wait, or `None` if it may request now
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.duration_since(last);
        if elapsed < self.request_delay {
            Some(self.request_delay - elapsed)
        } else {
            None
        }
    }
}
