//! Per-invocation context.
//!
//! An [`InvocationContext`] is created by the hosting adapter for every
//! invocation and handed to the matched handler unchanged. The router itself
//! never inspects the deadline or the cancellation signal.

use std::time::{Duration, Instant};

use tokio::sync::watch;

/// Context passed through to handlers.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: String,
    deadline: Option<Instant>,
    cancel: CancelSignal,
}

impl InvocationContext {
    /// Create a context that has no deadline and is never cancelled.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
            cancel: CancelSignal::never(),
        }
    }

    /// Attach the invocation deadline supplied by the hosting runtime.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation signal owned by the caller.
    pub fn with_cancel_signal(mut self, signal: CancelSignal) -> Self {
        self.cancel = signal;
        self
    }

    /// Identifier of this invocation.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Invocation deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `Some(Duration::ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// The cancellation signal.
    pub fn cancel_signal(&self) -> &CancelSignal {
        &self.cancel
    }

    /// Returns `true` if the caller has cancelled this invocation.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Receiving half of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Create a connected [`Canceller`] and signal.
    pub fn pair() -> (Canceller, Self) {
        let (tx, rx) = watch::channel(false);
        (Canceller { tx }, Self { rx })
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        let (_, signal) = Self::pair();
        signal
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until cancellation is requested.
    ///
    /// Never completes if the [`Canceller`] is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            let cancelled = *rx.borrow_and_update();
            if cancelled {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Sending half of a cancellation signal, kept by the caller.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Create another signal connected to this canceller.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}
