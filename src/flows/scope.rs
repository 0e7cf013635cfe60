use crate::error::{GeoError, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Lifetime of one screen.
///
/// Network calls made on behalf of the screen run through [`ScreenScope::run`].
/// Closing or dropping the scope cancels them, and a cancelled call
/// resolves to `GeoError::Cancelled` so callers skip their state updates.
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope tied to an externally owned token (e.g. Ctrl-C handling).
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// A nested scope, cancelled with its parent or on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F, T>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_closed() {
            return Err(GeoError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("operation cancelled with its screen");
                Err(GeoError::Cancelled)
            }
            result = operation => result,
        }
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
