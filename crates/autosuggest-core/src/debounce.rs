//! Debouncing of rapidly changing input values
//!
//! Every scheduled value restarts the quiet period and replaces the value that was
//! waiting. The value is emitted only once it has been left alone for the whole delay.

use tokio::time::{sleep_until, Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds the latest value until it has been stable for `delay`
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, restarting the timer
    ///
    /// Returns the value that was still waiting, which will now never be emitted.
    pub fn schedule(&mut self, value: T) -> Option<T> {
        let replaced = self.pending.replace(Pending {
            value,
            deadline: Instant::now() + self.delay,
        });
        replaced.map(|p| p.value)
    }

    /// Drop the waiting value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the waiting value is emitted
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(Instant::now()))
    }

    /// Wait for the scheduled value to settle
    ///
    /// Never resolves while nothing is scheduled. Dropping the returned future keeps the
    /// value scheduled, so this can sit in a `tokio::select!` loop next to the events
    /// that reschedule it.
    pub async fn fired(&mut self) -> T {
        loop {
            let Some(deadline) = self.pending.as_ref().map(|p| p.deadline) else {
                return std::future::pending().await;
            };
            sleep_until(deadline).await;
            if let Some(pending) = self.pending.take() {
                return pending.value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_emits_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();

        debouncer.schedule("ap");
        assert_eq!(debouncer.fired().await, "ap");
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_restarts_timer() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();

        debouncer.schedule("a");
        tokio::time::sleep(Duration::from_millis(200)).await;
        let discarded = debouncer.schedule("ap");

        assert_eq!(discarded, Some("a"));
        assert_eq!(debouncer.fired().await, "ap");
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_scheduled_never_fires() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(Duration::from_millis(10));
        let result = tokio::time::timeout(Duration::from_secs(5), debouncer.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_pending_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(1);
        assert_eq!(debouncer.cancel(), Some(1));

        let result = tokio::time::timeout(Duration::from_secs(1), debouncer.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule("kiwi");

        let early = tokio::time::timeout(Duration::from_millis(50), debouncer.fired()).await;
        assert!(early.is_err());
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fired().await, "kiwi");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert_eq!(debouncer.remaining(), None);
        debouncer.schedule(());
        assert_eq!(debouncer.remaining(), Some(Duration::from_millis(100)));
    }
}
