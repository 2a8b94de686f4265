//! Bounded-concurrency admission for outbound requests.
//!
//! A tokio [`Semaphore`] is fair: waiters are admitted first-in-first-out
//! and a released permit goes straight to the head of the queue. Permits are
//! RAII guards, so a slot is returned on every exit path, including errors,
//! panics and dropped futures.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::error::RoutingError;

/// Limits how many requests are in flight at once.
///
/// Clones share the same slots.
#[derive(Debug, Clone)]
pub struct Throttle {
    semaphore: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    limit: usize,
}

/// An acquired slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct ThrottlePermit {
    in_flight: Arc<AtomicUsize>,
    // Dropped after `Drop::drop` runs, so the counter is decremented
    // before the slot can be handed to a waiter.
    _permit: OwnedSemaphorePermit,
}

impl Drop for ThrottlePermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Throttle {
    /// Create a throttle admitting `limit` concurrent holders (at least one).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Wait for a free slot, queueing behind earlier callers.
    pub async fn acquire(&self) -> Result<ThrottlePermit, RoutingError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| RoutingError::ThrottleClosed)?;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        Ok(ThrottlePermit {
            in_flight: self.in_flight.clone(),
            _permit: permit,
        })
    }

    /// Run `task` while holding a slot.
    pub async fn run<F>(&self, task: F) -> Result<F::Output, RoutingError>
    where
        F: Future,
    {
        let _permit = self.acquire().await?;
        Ok(task.await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn zero_limit_still_admits_one() {
        assert_eq!(Throttle::new(0).limit(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn never_exceeds_limit_and_all_complete() {
        let throttle = Throttle::new(2);
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..24)
            .map(|i| {
                let throttle = throttle.clone();
                let peak = peak.clone();
                tokio::spawn(async move {
                    throttle
                        .run(async {
                            let now = throttle.in_flight();
                            peak.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(2 + (i % 3))).await;
                            i
                        })
                        .await
                })
            })
            .collect();

        let mut done = Vec::new();
        for handle in handles {
            done.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(done.len(), 24);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert!(peak.load(Ordering::SeqCst) >= 1);
        assert_eq!(throttle.in_flight(), 0);
    }

    #[tokio::test]
    async fn waiters_are_admitted_in_order() {
        let throttle = Throttle::new(1);
        let order = Arc::new(Mutex::new(Vec::new()));

        let gate = throttle.acquire().await.unwrap();

        let mut handles = Vec::new();
        for i in 0..5 {
            let throttle = throttle.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                let _permit = throttle.acquire().await.unwrap();
                order.lock().unwrap().push(i);
            }));
            // Let the task reach the semaphore queue before spawning the next
            tokio::task::yield_now().await;
        }

        drop(gate);
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn slot_released_when_task_panics() {
        let throttle = Throttle::new(1);

        let t = throttle.clone();
        let result = tokio::spawn(async move {
            t.run(async {
                panic!("task failed");
            })
            .await
        })
        .await;
        assert!(result.is_err());

        assert_eq!(throttle.in_flight(), 0);
        let permit = tokio::time::timeout(Duration::from_secs(1), throttle.acquire()).await;
        assert!(permit.is_ok());
    }

    #[tokio::test]
    async fn slot_released_when_future_dropped() {
        let throttle = Throttle::new(1);

        let stalled = throttle.run(std::future::pending::<()>());
        let timed_out = tokio::time::timeout(Duration::from_millis(20), stalled).await;
        assert!(timed_out.is_err());

        assert_eq!(throttle.in_flight(), 0);
        assert!(throttle.run(async { 7 }).await.is_ok());
    }
}
