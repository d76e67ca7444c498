/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Outbound rate limiter for market data provider calls
//!
//! Yahoo Finance throttles (and eventually bans) clients that hammer it, so
//! every provider request waits on a `governor` token bucket first.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Token bucket shared by every clone of the provider client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `period_seconds`,
    /// with bursts of up to `burst_size`
    ///
    /// Zero values fall back to one request per second with a burst of one.
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        let limiter = GovernorRateLimiter::direct(Self::quota(config));
        Self {
            limiter: Arc::new(limiter),
        }
    }

    fn quota(config: &RateLimiterConfig) -> Quota {
        let period = Duration::from_secs(config.period_seconds.max(1));
        let max_requests = config.max_requests.max(1);
        let replenish = period / max_requests;
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);

        Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst)
    }

    /// Waits until the bucket lets one more request through
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Takes a token if one is available right now
    #[must_use]
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limiter", &"GovernorRateLimiter")
            .finish()
    }
}
