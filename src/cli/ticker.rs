//! Background polling of the autosave deadline while the shell waits for input.

use std::{
    io,
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

/// How often an idle interactive shell checks the autosave deadline.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Runs `tick` on a worker thread every `interval` until stopped or dropped.
pub struct AutosaveTicker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AutosaveTicker {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("autosave-ticker".into())
            .spawn(move || loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the worker and waits for it; no tick starts afterwards.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("autosave ticker thread panicked");
            }
        }
    }
}

impl Drop for AutosaveTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
