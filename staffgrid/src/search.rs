//! Debounced search input.
//!
//! Values pushed with [`DebouncedSearch::set`] are reported only after the
//! input has been quiet for the debounce delay. Each changed value restarts
//! the timer. The initial value is reported once after the first quiet period.

use std::time::Duration;

use log::trace;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Handle to a background debounce task. Dropping it stops the task.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct DebouncedSearch {
    input: watch::Sender<String>,
    output: mpsc::UnboundedReceiver<String>,
    task: JoinHandle<()>,
}

impl DebouncedSearch {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(initial: impl Into<String>, delay: Duration) -> Self {
        let (input, watch_rx) = watch::channel(initial.into());
        let (output_tx, output) = mpsc::unbounded_channel();
        let task = tokio::spawn(debounce(watch_rx, output_tx, delay));
        Self { input, output, task }
    }

    /// Update the input. Setting the current value again is ignored.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.input.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// The latest input, settled or not.
    pub fn value(&self) -> String {
        self.input.borrow().clone()
    }

    /// Wait for the next settled value.
    pub async fn next(&mut self) -> Option<String> {
        self.output.recv().await
    }

    /// A settled value if one is ready, without waiting.
    pub fn try_next(&mut self) -> Option<String> {
        self.output.try_recv().ok()
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn debounce(mut input: watch::Receiver<String>, output: mpsc::UnboundedSender<String>, delay: Duration) {
    loop {
        let quiet = sleep(delay);
        tokio::pin!(quiet);
        loop {
            tokio::select! {
                _ = &mut quiet => break,
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    quiet.as_mut().reset(Instant::now() + delay);
                }
            }
        }

        let value = input.borrow_and_update().clone();
        trace!("search settled on {:?}", value);
        if output.send(value).is_err() {
            return;
        }
        if input.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::task::yield_now;
    use tokio::time::advance;

    use super::*;

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {:?}, expected {:?}",
            elapsed,
            expected
        );
    }

    #[tokio::test(start_paused = true)]
    async fn initial_value_after_first_quiet_period() {
        let start = Instant::now();
        let mut search = DebouncedSearch::new("ops");
        assert_eq!(search.next().await.as_deref(), Some("ops"));
        assert_elapsed(start, DEFAULT_DEBOUNCE);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let delay = Duration::from_millis(500);
        let start = Instant::now();
        let mut search = DebouncedSearch::with_delay("", delay);
        yield_now().await;

        for text in ["a", "ab", "abc"] {
            search.set(text);
            yield_now().await;
            advance(Duration::from_millis(200)).await;
        }
        assert_eq!(search.try_next(), None);

        assert_eq!(search.next().await.as_deref(), Some("abc"));
        assert_elapsed(start, Duration::from_millis(900));
        assert_eq!(search.try_next(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn same_value_does_not_restart_timer() {
        let start = Instant::now();
        let mut search = DebouncedSearch::with_delay("x", Duration::from_millis(500));
        yield_now().await;
        advance(Duration::from_millis(300)).await;
        search.set("x");
        assert_eq!(search.next().await.as_deref(), Some("x"));
        assert_elapsed(start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn each_settled_change_is_reported() {
        let mut search = DebouncedSearch::with_delay("", Duration::from_millis(100));
        assert_eq!(search.next().await.as_deref(), Some(""));
        search.set("alice");
        assert_eq!(search.next().await.as_deref(), Some("alice"));
        assert_eq!(search.value(), "alice");
    }
}
