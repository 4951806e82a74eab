//! Trailing-edge debouncer

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Single-slot trailing-edge debouncer.
///
/// Each trigger replaces the pending action, so the action runs only once
/// the delay has elapsed with no further trigger. An instance belongs to
/// exactly one debounced operation; sharing one would let unrelated
/// triggers cancel each other's pending work.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Arm the timer with a new action, replacing any pending one.
    ///
    /// Spawns onto the ambient Tokio runtime. A zero delay still defers
    /// through the timer, never running the action synchronously.
    pub fn trigger<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Drop the pending action without running it
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().unwrap().take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_rapid_triggers_run_once() {
        let debouncer = Debouncer::new(Duration::from_millis(200));
        let hits = Arc::new(AtomicU32::new(0));

        for _ in 0..5 {
            let hits = hits.clone();
            debouncer.trigger(async move {
                hits.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_trigger_wins() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for word in ["dog", "dogf", "dogfish"] {
            let seen = seen.clone();
            debouncer.trigger(async move {
                seen.lock().unwrap().push(word);
            });
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["dogfish"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_restarts_the_window() {
        let debouncer = Debouncer::new(Duration::from_millis(200));
        let hits = Arc::new(AtomicU32::new(0));

        let first = hits.clone();
        debouncer.trigger(async move {
            first.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(150)).await;

        let second = hits.clone();
        debouncer.trigger(async move {
            second.fetch_add(1, Ordering::SeqCst);
        });
        // 300ms after the first trigger, 150ms after the second: still quiet
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let hits = Arc::new(AtomicU32::new(0));

        let pending = hits.clone();
        debouncer.trigger(async move {
            pending.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_still_defers() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let hits = Arc::new(AtomicU32::new(0));

        let pending = hits.clone();
        debouncer.trigger(async move {
            pending.fetch_add(1, Ordering::SeqCst);
        });
        // Nothing has been awaited yet, so the action cannot have run
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
