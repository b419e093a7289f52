use std::sync::mpsc;
use std::thread;

use crate::authenticator::SharedAuthenticator;
use crate::task::AuthTask;

/// The serial execution domain backing one authentication service.
///
/// Exactly one dedicated thread consumes tasks in FIFO submission order;
/// there is no dynamic sizing. The next task is pulled only after the
/// previous task's completion handler has returned, so no two tasks from the
/// same worker ever overlap. Workers of distinct services never interact.
pub(crate) struct SerialWorker {
    /// `None` once the queue has been released.
    task_tx: Option<mpsc::Sender<AuthTask>>,
}

impl SerialWorker {
    pub(crate) fn new(authenticator: SharedAuthenticator) -> Self {
        let (task_tx, task_rx) = mpsc::channel();

        // The join handle is discarded: nothing ever joins the worker. See
        // `release` for how the thread winds down.
        thread::Builder::new()
            .name("authq-worker".to_string())
            .spawn(move || Self::run(task_rx, authenticator))
            .expect("failed to spawn authentication worker thread");

        Self {
            task_tx: Some(task_tx),
        }
    }

    /// Enqueue a task. Non-blocking; safe to call from any number of caller
    /// threads. Returns `false` if the queue has been released.
    pub(crate) fn submit(&self, task: AuthTask) -> bool {
        match &self.task_tx {
            // The worker holds the receiver for as long as any sender lives,
            // so this send only fails if the worker thread panicked.
            Some(task_tx) => task_tx.send(task).is_ok(),
            None => false,
        }
    }

    /// Drop the queue sender without joining the worker.
    ///
    /// The worker drains every task already queued, fires their completion
    /// handlers, and exits once the queue is empty. Nothing waits on it.
    pub(crate) fn release(&mut self) {
        self.task_tx = None;
    }

    fn run(task_rx: mpsc::Receiver<AuthTask>, authenticator: SharedAuthenticator) {
        // `recv` errors only once every sender is gone and the queue has
        // drained, which is exactly the release contract.
        while let Ok(task) = task_rx.recv() {
            task.run(&*authenticator);
        }

        tracing::debug!("authentication worker exiting");
    }
}
