//! Cancellation signal for processing waits

use tokio_util::sync::CancellationToken;

/// Cloneable one-way cancellation flag.
///
/// Every clone observes the same token; once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Fire the signal, waking every pending `cancelled()`
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolve once the signal has fired
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}
