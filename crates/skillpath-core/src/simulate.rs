//! Simulated asynchronous operations.
//!
//! Path generation, topic search and code execution stand in for remote calls.
//! Each one runs as a tokio task that waits a fixed latency, computes exactly
//! one value and hands it over through a oneshot channel. There are no retries
//! and no cancellation: dropping the [`Pending`] handle just means nobody
//! receives the value when the task finishes.

use std::time::Duration;
use tokio::sync::oneshot;

use crate::error::AssessmentError;

/// Handle to a single in-flight simulated result.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

/// Run `work` after `delay` on the current tokio runtime.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn simulate<T, F>(delay: Duration, work: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if tx.send(work()).is_err() {
            tracing::debug!("simulated result discarded: handle was dropped");
        }
    });
    Pending { rx }
}

impl<T> Pending<T> {
    /// Wait for the result.
    pub async fn wait(self) -> Result<T, AssessmentError> {
        self.rx.await.map_err(|_| AssessmentError::Abandoned)
    }

    /// Take the result if it has already arrived.
    pub fn try_take(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
