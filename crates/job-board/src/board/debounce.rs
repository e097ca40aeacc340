//! Trailing-edge debounce for values that change faster than they should be acted on.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest committed value and the single pending timer.
///
/// Every [`Debounced::set`] aborts the pending timer before scheduling a new one, so a
/// stale value can never be committed after a more recent one. Must be used from
/// within a tokio runtime.
pub struct Debounced<T> {
    delay: Duration,
    latest: T,
    output: watch::Sender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(initial: T, delay: Duration) -> Self {
        let (output, _) = watch::channel(initial.clone());
        Self {
            delay,
            latest: initial,
            output,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Value most recently committed by a timer.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    pub fn set(&mut self, value: T) {
        if value == self.latest && self.pending.is_some() {
            return;
        }
        self.latest = value;
        self.schedule();
    }

    pub fn set_delay(&mut self, delay: Duration) {
        if delay == self.delay {
            return;
        }
        self.delay = delay;
        self.schedule();
    }

    /// Drops the pending timer without committing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn schedule(&mut self) {
        self.cancel();

        // Measured from the call, not from the task's first poll.
        let deadline = Instant::now() + self.delay;
        let output = self.output.clone();
        let value = self.latest.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            output.send_if_modified(|current| {
                if *current == value {
                    false
                } else {
                    *current = value;
                    true
                }
            });
        }));
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn commits_after_the_delay() {
        let mut query = Debounced::new(String::new());
        query.set("rust".to_string());

        advance(299).await;
        assert_eq!(query.current(), "");

        advance(2).await;
        assert_eq!(query.current(), "rust");
        assert!(!query.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn commits_exactly_when_the_delay_elapses() {
        let mut counter = Debounced::with_delay(0u32, Duration::from_millis(100));
        let mut seen = counter.subscribe();
        counter.set(1);

        advance(99).await;
        assert_eq!(counter.current(), 0);

        advance(1).await;
        assert_eq!(counter.current(), 1);
        assert!(seen.has_changed().expect("sender alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_input_commits_only_the_latest_value() {
        let mut query = Debounced::with_delay(String::new(), Duration::from_millis(100));
        let mut seen = query.subscribe();

        query.set("r".to_string());
        advance(60).await;
        query.set("ru".to_string());
        advance(60).await;
        query.set("rust".to_string());

        advance(60).await;
        assert_eq!(query.current(), "", "earlier timers must not fire");

        advance(50).await;
        assert_eq!(query.current(), "rust");
        assert!(seen.has_changed().expect("sender alive"));
        assert_eq!(*seen.borrow_and_update(), "rust");

        advance(500).await;
        assert!(!seen.has_changed().expect("sender alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn changing_delay_reschedules_pending_value() {
        let mut query = Debounced::with_delay(0u32, Duration::from_millis(100));
        query.set(7);
        advance(50).await;
        query.set_delay(Duration::from_millis(400));

        advance(100).await;
        assert_eq!(query.current(), 0);

        advance(301).await;
        assert_eq!(query.current(), 7);
        assert_eq!(query.delay(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut query = Debounced::with_delay(1u8, Duration::from_millis(10));
        query.set(2);
        query.cancel();
        advance(50).await;
        assert_eq!(query.current(), 1);
    }
}
