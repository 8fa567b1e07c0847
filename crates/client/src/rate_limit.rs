//! Outbound request pacing.
//!
//! Every request a client sends first takes a permit from one shared
//! [`RateLimiter`]. The limiter governs pacing only; correctness never
//! depends on it.
//!
//! # Invariants
//! - A cancelled token wins over an available permit.
//! - Implementations are shared across concurrent calls (`Send + Sync`).

use std::fmt;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};

use crate::cancellation::CancellationToken;
use crate::error::{ClientError, Result};

/// Source of permission to send one request.
#[async_trait]
pub trait RateLimiter: Send + Sync + fmt::Debug {
    /// Wait until one request may be sent.
    async fn acquire(&self) -> Result<()>;
}

/// Token-bucket limiter backed by `governor`.
pub struct GovernorRateLimiter {
    limiter: DefaultDirectRateLimiter,
    per_second: NonZeroU32,
}

impl GovernorRateLimiter {
    /// Allow `per_second` requests per second with an equal burst.
    ///
    /// # Errors
    /// Returns [`ClientError::RateLimiter`] when `per_second` is zero.
    pub fn per_second(per_second: u32) -> Result<Self> {
        let per_second = NonZeroU32::new(per_second).ok_or_else(|| {
            ClientError::RateLimiter("rate limit must be at least 1 request per second".into())
        })?;
        Ok(Self {
            limiter: DefaultDirectRateLimiter::direct(Quota::per_second(per_second)),
            per_second,
        })
    }

    /// Configured requests per second.
    pub fn rate(&self) -> u32 {
        self.per_second.get()
    }
}

impl fmt::Debug for GovernorRateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernorRateLimiter")
            .field("per_second", &self.per_second)
            .finish()
    }
}

#[async_trait]
impl RateLimiter for GovernorRateLimiter {
    async fn acquire(&self) -> Result<()> {
        self.limiter.until_ready().await;
        Ok(())
    }
}

/// Limiter that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

#[async_trait]
impl RateLimiter for Unlimited {
    async fn acquire(&self) -> Result<()> {
        Ok(())
    }
}

/// Take a permit from `limiter`, giving up as soon as `cancel` fires.
///
/// Returns how long the caller waited.
///
/// # Errors
/// - [`ClientError::Cancelled`] if the token fired first (or was already cancelled).
/// - Whatever error the limiter itself reports.
pub async fn acquire_permit(
    limiter: &dyn RateLimiter,
    cancel: &CancellationToken,
) -> Result<Duration> {
    let started = Instant::now();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        permit = limiter.acquire() => permit.map(|()| started.elapsed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct NeverReady;

    #[async_trait]
    impl RateLimiter for NeverReady {
        async fn acquire(&self) -> Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let err = GovernorRateLimiter::per_second(0).unwrap_err();
        assert!(matches!(err, ClientError::RateLimiter(_)));
    }

    #[tokio::test]
    async fn test_unlimited_grants_immediately() {
        let waited = acquire_permit(&Unlimited, &CancellationToken::new())
            .await
            .unwrap();
        assert!(waited < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_governor_grants_burst_without_waiting() {
        let limiter = GovernorRateLimiter::per_second(5).unwrap();
        assert_eq!(limiter.rate(), 5);
        let cancel = CancellationToken::new();
        for _ in 0..5 {
            acquire_permit(&limiter, &cancel).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_beats_available_permit() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = acquire_permit(&Unlimited, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_wait() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(NeverReady);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn({
            let limiter = Arc::clone(&limiter);
            let cancel = cancel.clone();
            async move { acquire_permit(limiter.as_ref(), &cancel).await }
        });

        tokio::task::yield_now().await;
        assert!(!handle.is_finished());

        cancel.cancel();
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }
}
