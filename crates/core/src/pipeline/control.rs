use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal.
///
/// Cloned into the worker and polled at frame boundaries only; a request
/// never preempts mid-frame work, so worst-case cancellation latency is
/// one frame's processing time. Once cancelled it stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Cooperative pause signal, checked at the same frame boundary.
///
/// While paused the worker holds all open handles and consumes no frames;
/// resuming simply lets the loop continue.
#[derive(Clone, Debug, Default)]
pub struct PauseSwitch {
    flag: Arc<AtomicBool>,
}

impl PauseSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
