//! Cancellation helpers for background requests whose results may be
//! superseded before they arrive.
//!
//! `OrCancelExt` races any future against a `CancellationToken`.
//! `LatestRequest` hands out one cancellation token per issued request and
//! cancels the previous one, so only the most recent request can complete
//! normally.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Error returned when a future lost the race against its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("request was superseded")
    }
}

impl std::error::Error for Cancelled {}

/// Extension trait for making futures cancellable.
#[async_trait]
pub trait OrCancelExt: Sized {
    type Output;

    /// Returns `Ok(output)` if the future completes first, or `Err(Cancelled)`
    /// once the token fires. A token that is already cancelled wins even if
    /// the future would be immediately ready.
    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, Cancelled>;
}

#[async_trait]
impl<F> OrCancelExt for F
where
    F: Future + Send,
    F::Output: Send,
{
    type Output = F::Output;

    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, Cancelled> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(Cancelled),
            res = self => Ok(res),
        }
    }
}

/// Monotonically increasing identifier for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const fn first() -> Self {
        Self(1)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tracks the single authoritative in-flight request.
///
/// Issuing a new request cancels the token of whichever request was
/// outstanding before it.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: Option<(RequestToken, CancellationToken)>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `token` the authoritative request and return the cancellation
    /// token its worker should observe.
    pub fn supersede(&mut self, token: RequestToken) -> CancellationToken {
        let cancel = CancellationToken::new();
        if let Some((_, previous)) = self.current.replace((token, cancel.clone())) {
            previous.cancel();
        }
        cancel
    }

    pub fn current(&self) -> Option<RequestToken> {
        self.current.as_ref().map(|(token, _)| *token)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.current() == Some(token)
    }

    /// Release the slot when `token` completes. Returns `false` when `token`
    /// was already superseded, leaving the newer request untouched.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if self.is_latest(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Cancel the outstanding request, if any.
    pub fn cancel(&mut self) {
        if let Some((_, cancel)) = self.current.take() {
            cancel.cancel();
        }
    }
}

impl Drop for LatestRequest {
    fn drop(&mut self) {
        self.cancel();
    }
}
