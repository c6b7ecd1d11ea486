//! Background task dispatcher.
//!
//! Runs inference work off the socket path. `dispatch` hands a future to
//! the tokio runtime behind a semaphore bound, so a burst of messages
//! queues instead of saturating the process with concurrent model calls.
//! The caller never waits; a dispatched task owns its error handling and
//! reports failures as room events, never back to the dispatcher.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

pub struct TaskDispatcher {
    permits: Arc<Semaphore>,
}

impl TaskDispatcher {
    /// # Arguments
    ///
    /// * `max_concurrent` - Upper bound on tasks running at once; further
    ///   dispatches queue until a permit frees up
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Schedule a task for background execution. Returns immediately.
    ///
    /// No ordering is guaranteed between dispatched tasks, including two
    /// tasks for the same room.
    pub fn dispatch<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = self.permits.clone();
        tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return, // semaphore closed, process is shutting down
            };
            task.await;
        });
    }
}
