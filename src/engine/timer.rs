//! Cancellable scheduled callbacks.
//!
//! A scheduled task delivers an event into the app's channel. Cancelling or
//! dropping the handle aborts the task, so nothing fires after teardown.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Send a fresh `event()` every `period`, starting one period from now.
    pub fn every<T, F>(period: Duration, sender: UnboundedSender<T>, event: F) -> Self
    where
        T: Send + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if sender.send(event()).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Send `event` once after `delay`.
    pub fn once<T>(delay: Duration, sender: UnboundedSender<T>, event: T) -> Self
    where
        T: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(event);
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_every_fires_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = ScheduledTask::every(Duration::from_secs(1), tx, || 7u32);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let mut fired = 0;
        while rx.try_recv().is_ok() {
            fired += 1;
        }
        assert_eq!(fired, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::every(Duration::from_secs(1), tx, || ());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        task.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_once_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::once(Duration::from_millis(1500), tx, "advance");
        drop(task);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::once(Duration::from_millis(1500), tx, "advance");

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(rx.try_recv().ok(), Some("advance"));
        assert!(task.is_finished());
    }
}
