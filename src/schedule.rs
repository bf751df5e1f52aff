//! Cancellable scheduled-task abstraction
//!
//! Debounced refetches and scroll-trigger coalescing both run through this:
//! one pending task per logical trigger key, where scheduling again under the
//! same key replaces whatever was pending.

use log::debug;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct TaskScheduler {
    tasks: Mutex<HashMap<&'static str, JoinHandle<()>>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Run `task` after `delay`, replacing any task still pending under the
    /// same key. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, key: &'static str, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let mut tasks = self.tasks.lock().unwrap();
        if let Some(previous) = tasks.insert(key, handle) {
            debug!("Replacing pending '{}' task", key);
            previous.abort();
        }
    }

    pub fn cancel(&self, key: &'static str) {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(handle) = tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock().unwrap();
        for (_, handle) in tasks.drain() {
            handle.abort();
        }
    }

    /// True while a task under `key` has neither run nor been cancelled.
    pub fn has_pending(&self, key: &'static str) -> bool {
        let tasks = self.tasks.lock().unwrap();
        tasks.get(key).map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
