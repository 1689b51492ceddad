//! Future type for the async JWT surface.
//!
//! The work itself is the synchronous core; this module only moves it onto
//! the blocking pool and hands the result back through a oneshot channel.

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::{runtime::Handle, sync::oneshot};

/// Pending result of an async sign or verify.
#[must_use = "futures do nothing unless awaited"]
pub struct AsyncJwtResult<T> {
    receiver: oneshot::Receiver<JwtResult<T>>,
}

impl<T: Send + 'static> AsyncJwtResult<T> {
    /// Run `work` on the current runtime's blocking pool, or inline when no
    /// runtime is active.
    pub(crate) fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> JwtResult<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = move || {
            // The receiver may already be gone; nobody is left to tell.
            let _ = tx.send(work());
        };
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => task(),
        }
        Self { receiver: rx }
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::internal("Channel closed"))),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_result_from_blocking_pool() {
        let result = AsyncJwtResult::spawn(|| Ok(41 + 1)).await;
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn runs_inline_without_runtime() {
        let pending = AsyncJwtResult::<u8>::spawn(|| Err(JwtError::InvalidSignature));
        let result = futures::executor::block_on(pending);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }
}
