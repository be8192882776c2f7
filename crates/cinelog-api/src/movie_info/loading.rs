//! In-flight marker for fetch operations.

use tokio::sync::watch;

/// Observable "loading" flag shared between a fetch and its viewers.
///
/// A fetch raises the flag through [`LoadingSignal::begin`]; the returned
/// guard lowers it when dropped, so the flag is released on every exit
/// path.
#[derive(Debug)]
pub struct LoadingSignal {
    tx: watch::Sender<bool>,
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingSignal {
    /// Creates a lowered signal.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Subscribes to flag transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Current flag value.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    /// Raises the flag until the returned guard is dropped.
    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_replace(true);
        LoadingGuard { signal: self }
    }
}

/// Lowers the owning [`LoadingSignal`] on drop.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    signal: &'a LoadingSignal,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.signal.tx.send_replace(false);
    }
}
