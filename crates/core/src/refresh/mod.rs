//! Cancellable periodic refresh tasks.
//!
//! Each polling loop (quote refresh, portfolio insights) is a
//! `RefreshTask` owned by the view controller that mounted it. Dropping
//! the view drops the task, which aborts the underlying tokio task —
//! including any request that is still in flight, so nothing dispatches
//! into a store after its owner is gone.
//!
//! Failure policy lives in the tick closure: background refresh failures
//! are logged and the last-known-good state is kept; only first loads
//! surface errors to the user.

use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// A periodic background refresh bound to its owner's lifetime.
pub struct RefreshTask {
    label: String,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawns a refresh loop with the given cadence.
    ///
    /// The first tick fires immediately; subsequent ticks keep the
    /// cadence, delaying rather than bursting when a tick overruns.
    pub fn spawn<F, Fut>(label: impl Into<String>, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let label = label.into();
        let task_label = label.clone();
        let handle = tokio::spawn(async move {
            debug!(
                "Refresh task '{}' started ({}s cadence)",
                task_label,
                period.as_secs()
            );
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick().await;
            }
        });
        Self { label, handle }
    }

    /// Stops the loop, aborting any tick that is still in flight.
    pub fn cancel(self) {
        debug!("Refresh task '{}' cancelled", self.label);
        // Drop performs the abort
    }

    /// True once the task has stopped running.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    #[tokio::test]
    async fn first_tick_fires_immediately_and_repeats() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let task = RefreshTask::spawn("test", Duration::from_millis(20), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        sleep(Duration::from_millis(70)).await;
        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 2, "expected repeated ticks, saw {}", seen);
        task.cancel();
    }

    #[tokio::test]
    async fn cancel_stops_ticking_and_aborts_in_flight_work() {
        let started = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let s = started.clone();
        let c = completed.clone();

        let task = RefreshTask::spawn("slow", Duration::from_millis(5), move || {
            let s = s.clone();
            let c = c.clone();
            async move {
                s.fetch_add(1, Ordering::SeqCst);
                // Stands in for a hung backend call
                sleep(Duration::from_secs(60)).await;
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        sleep(Duration::from_millis(50)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);
        task.cancel();

        sleep(Duration::from_millis(50)).await;
        // The in-flight tick never completed: it was aborted, not awaited
        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropping_the_task_tears_the_loop_down() {
        let ticks = Arc::new(AtomicUsize::new(0));
        {
            let counter = ticks.clone();
            let _task = RefreshTask::spawn("scoped", Duration::from_millis(10), move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            });
            sleep(Duration::from_millis(25)).await;
        }
        let after_drop = ticks.load(Ordering::SeqCst);
        sleep(Duration::from_millis(40)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
    }
}
