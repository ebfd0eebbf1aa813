//! Main Thread Executor
//!
//! Implements the `MainContext` port with one dedicated, named thread that
//! runs every dispatched task on a current-thread tokio runtime. Tasks start
//! in dispatch order and never migrate off that thread.

use crate::domain::errors::AdapterError;
use crate::ports::outbound::{MainContext, MainTask};
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::{debug, warn};

/// Default name of the UI thread.
pub const MAIN_THREAD_NAME: &str = "cmp-main";

/// Single-thread executor standing in for the platform UI thread.
pub struct MainThreadExecutor {
    sender: Option<mpsc::UnboundedSender<MainTask>>,
    thread: Option<JoinHandle<()>>,
    thread_id: ThreadId,
}

impl MainThreadExecutor {
    /// Start the executor thread with the default name.
    pub fn start() -> Result<Self, AdapterError> {
        Self::start_named(MAIN_THREAD_NAME)
    }

    /// Start the executor thread with a custom name.
    pub fn start_named(name: &str) -> Result<Self, AdapterError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (sender, mut receiver) = mpsc::unbounded_channel::<MainTask>();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let local = LocalSet::new();
                local.spawn_local(async move {
                    while let Some(task) = receiver.recv().await {
                        tokio::task::spawn_local(task);
                    }
                });
                // Resolves once the channel closed and every task finished.
                runtime.block_on(local);
            })?;

        let thread_id = thread.thread().id();
        debug!(thread = name, "Main thread executor started");

        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
            thread_id,
        })
    }

    /// Whether the caller is running on the executor thread.
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id
    }
}

impl MainContext for MainThreadExecutor {
    fn dispatch(&self, task: MainTask) {
        let Some(sender) = &self.sender else {
            warn!("Main thread executor stopped, task dropped");
            return;
        };
        if sender.send(task).is_err() {
            warn!("Main thread executor closed, task dropped");
        }
    }
}

impl Drop for MainThreadExecutor {
    fn drop(&mut self) {
        // Closing the channel lets in-flight tasks finish, then the thread exits.
        self.sender.take();

        let Some(thread) = self.thread.take() else {
            return;
        };
        if self.is_current() {
            return;
        }
        if thread.join().is_err() {
            warn!("Main thread executor panicked during shutdown");
        }
    }
}
