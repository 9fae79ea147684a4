use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of requests currently waiting on the network
#[derive(Debug, Default)]
pub(crate) struct InFlightCounter(AtomicUsize);

impl InFlightCounter {
    pub(crate) fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }

    /// Raise the count until the returned guard is dropped, including when
    /// the owning future is cancelled
    pub(crate) fn enter(&self) -> InFlight<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        InFlight(&self.0)
    }
}

pub(crate) struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
