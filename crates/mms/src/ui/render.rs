//! Render queue: marshals work from background threads onto the render thread
//!
//! [`render_queue`] returns a cloneable [`RenderQueue`] handle for posting and
//! the single [`RenderLoop`] that runs the posted tasks. Whoever drains the
//! loop *is* the render thread; tasks run in the order they were posted.

use log::debug;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Work posted to the render thread
pub type RenderTask = Box<dyn FnOnce() + Send + 'static>;

/// The render loop has been dropped, so nothing will ever run the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("render loop is closed")]
pub struct RenderQueueClosed;

/// Handle for posting tasks to the render thread
#[derive(Clone)]
pub struct RenderQueue {
    tx: Sender<RenderTask>,
}

impl RenderQueue {
    /// Enqueue `task` to run on the render thread
    pub fn post<F>(&self, task: F) -> Result<(), RenderQueueClosed>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx.send(Box::new(task)).map_err(|_| RenderQueueClosed)
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue").finish_non_exhaustive()
    }
}

/// Receiving end, owned by the render thread
pub struct RenderLoop {
    rx: Receiver<RenderTask>,
}

/// Create a connected queue/loop pair
pub fn render_queue() -> (RenderQueue, RenderLoop) {
    let (tx, rx) = mpsc::channel();
    (RenderQueue { tx }, RenderLoop { rx })
}

impl RenderLoop {
    /// Run every task that is already queued, without blocking
    ///
    /// Tasks posted by the tasks themselves run in the same call.
    /// Returns how many tasks ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return ran,
            }
        }
    }

    /// Run tasks until none arrives for `idle`
    ///
    /// Returns how many tasks ran. Also returns once every queue handle is gone.
    pub fn run_until_idle(&self, idle: Duration) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.recv_timeout(idle) {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(RecvTimeoutError::Timeout) => return ran,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Render queue disconnected after {} tasks", ran);
                    return ran;
                }
            }
        }
    }

    /// Run tasks until every [`RenderQueue`] handle has been dropped
    pub fn run(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.recv() {
            task();
            ran += 1;
        }
        ran
    }
}
