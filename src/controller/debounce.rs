use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Proof that a debounced job is still the latest one scheduled
#[derive(Debug, Clone)]
pub struct Generation {
    current: Arc<AtomicU64>,
    issued: u64,
}

impl Generation {
    /// False once a newer job was scheduled or the debouncer was cancelled.
    /// Check it right before publishing results.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.issued
    }
}

/// Runs the most recently scheduled job after a quiet period.
///
/// Scheduling aborts the pending job and bumps the generation, so a job that
/// already passed its last await point still sees it was superseded.
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn schedule<F, Fut>(&mut self, job: F)
    where
        F: FnOnce(Generation) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let issued = self.supersede();
        let generation = Generation {
            current: self.generation.clone(),
            issued,
        };
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job(generation).await;
        }));
    }

    /// Drops the pending job, if any
    pub fn cancel(&mut self) {
        self.supersede();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> Arc<Mutex<Vec<u32>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_job_runs() {
        let seen = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(250));

        for value in 1..=3 {
            let seen = seen.clone();
            debouncer.schedule(move |_| async move {
                seen.lock().unwrap().push(value);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_waits_for_quiet_period() {
        let seen = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));

        let sink = seen.clone();
        debouncer.schedule(move |_| async move {
            sink.lock().unwrap().push(1);
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(seen.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_job() {
        let seen = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        let sink = seen.clone();
        debouncer.schedule(move |_| async move {
            sink.lock().unwrap().push(1);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_generation_is_not_current() {
        let seen = recorder();
        let mut debouncer = Debouncer::new(Duration::ZERO);

        let slow_sink = seen.clone();
        debouncer.schedule(move |generation| async move {
            // still running when the next job is scheduled
            let stale = generation.clone();
            tokio::task::yield_now().await;
            if stale.is_current() {
                slow_sink.lock().unwrap().push(1);
            }
        });
        tokio::task::yield_now().await;

        let sink = seen.clone();
        debouncer.schedule(move |generation| async move {
            if generation.is_current() {
                sink.lock().unwrap().push(2);
            }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }
}
