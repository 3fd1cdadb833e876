//! Cancel-and-replace debouncing.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delivers only the latest submitted value once no new value has arrived
/// for a quiet period.
///
/// Each [`submit`](Debouncer::submit) aborts the previously scheduled value.
/// Settled values arrive on the receiver returned by [`Debouncer::new`].
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver of settled values.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            pending: Mutex::new(None),
            tx,
        };
        (debouncer, rx)
    }

    /// Schedules `value`, replacing whatever was scheduled before.
    pub fn submit(&self, value: T) {
        let tx = self.tx.clone();
        let quiet = self.quiet;
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Receiver gone means the session ended
            let _ = tx.send(value);
        });
        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
        }
    }

    /// Drops the scheduled value, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// Returns the quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_value_settles() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.submit("ze");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.submit("zel");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.submit("zelda");

        assert_eq!(rx.recv().await, Some("zelda"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn values_separated_by_quiet_period_all_settle() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.submit(1);
        assert_eq!(rx.recv().await, Some(1));
        debouncer.submit(2);
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.submit("doom");
        debouncer.cancel();
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(debouncer.quiet_period(), Duration::from_millis(500));
    }
}
