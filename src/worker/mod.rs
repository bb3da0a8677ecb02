use std::sync::mpsc;

/// Runs `work` on a background thread and hands back a pollable task handle.
///
/// Heavy operations (segmentation, flood fill over multi-megapixel buffers)
/// go through here so the interactive thread never blocks; the owner polls
/// the handle from its own loop and applies the result when it lands.
pub fn spawn<T, W>(work: W) -> WorkerTask<T>
where
    T: Send + 'static,
    W: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>();
    std::thread::spawn(move || {
        let result = work();
        let _ = tx.send(result);
    });
    WorkerTask { rx }
}

#[derive(Debug)]
pub struct WorkerTask<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> WorkerTask<T> {
    /// Non-blocking check for the finished result.
    pub fn try_take(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Blocks until the worker finishes. `None` only if the worker thread
    /// died before sending, which the engine treats as a dropped result.
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }
}
