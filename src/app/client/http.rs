//! Rate-limited JSON fetches
//!
//! A single attempt per call. Callers decide what a failure means; the live
//! forecast provider degrades instead of retrying.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::{ProviderError, ProviderResult};

type DirectRateLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// HTTP operations handler with client-side rate limiting
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: DirectRateLimiter,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limit
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::RateLimiterConfig` if `rate_limit_rps` is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> ProviderResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(rate_limit_rps: u32) -> ProviderResult<DirectRateLimiter> {
        let rps = NonZeroU32::new(rate_limit_rps).ok_or(ProviderError::RateLimiterConfig)?;
        Ok(RateLimiter::direct(Quota::per_second(rps)))
    }

    /// Fetches `url` and decodes the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failure, timeout, a non-success
    /// status, or a body that does not decode into `T`
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> ProviderResult<T> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let decoded = serde_json::from_slice(&body)?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(decoded)
    }
}
