/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

use crate::application::config::ProviderConfig;
use crate::application::rate_limiter::RateLimiter;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

/// HTTP client for the market data provider
///
/// Wraps a cookie-aware `reqwest` client and the outbound rate limiter.
/// Requests are never retried here: a failed call surfaces as an error to
/// the caller of the API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// Builds the client from the provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(&config.rate_limiter),
        })
    }

    /// GETs `url` and decodes a provider JSON envelope
    ///
    /// Non-2xx answers are still decoded when their body is a provider
    /// envelope, so callers can read the provider's own error object
    /// (an unknown ticker comes back as a 404 with `chart.error` set).
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let (status, body) = make_http_request(&self.client, &self.rate_limiter, url).await?;
        decode_envelope(status, &body)
    }

    /// GETs `url` and returns the body as text; any non-2xx status is an error
    pub async fn get_text(&self, url: Url) -> Result<String, AppError> {
        let (status, body) = make_http_request(&self.client, &self.rate_limiter, url).await?;
        if !status.is_success() {
            error!("Request failed with status {}: {}", status, body);
            return Err(AppError::Unexpected(status));
        }
        Ok(body)
    }

    /// GETs `url` only for the cookies it sets; the status is ignored
    pub async fn visit(&self, url: Url) -> Result<(), AppError> {
        self.rate_limiter.wait().await;
        debug!("GET {} (cookie priming)", url);
        let response = self.client.get(url).send().await?;
        debug!("Cookie priming status: {}", response.status());
        Ok(())
    }
}

/// Makes a rate-limited GET request and returns status and body
///
/// `401` maps to [`AppError::Unauthorized`] and `429` to
/// [`AppError::RateLimitExceeded`]; every other status is handed back to
/// the caller together with the body.
pub async fn make_http_request(
    client: &Client,
    rate_limiter: &RateLimiter,
    url: Url,
) -> Result<(StatusCode, String), AppError> {
    rate_limiter.wait().await;

    debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("Response status: {}", status);

    match status {
        StatusCode::UNAUTHORIZED => {
            let body = response.text().await.unwrap_or_default();
            warn!("Unauthorized: {}", body);
            Err(AppError::Unauthorized)
        }
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Provider rate limit exceeded");
            Err(AppError::RateLimitExceeded)
        }
        _ => {
            let body = response.text().await?;
            Ok((status, body))
        }
    }
}

/// Decodes a provider envelope from a response body
///
/// Successful statuses must decode; for other statuses the envelope is
/// returned when it decodes (it then carries the provider's error object)
/// and [`AppError::Unexpected`] otherwise.
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, AppError> {
    if status.is_success() {
        return serde_json::from_str(body)
            .map_err(|e| AppError::Deserialization(format!("unexpected provider payload: {e}")));
    }

    match serde_json::from_str(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) => {
            error!("Request failed with status {}: {}", status, body);
            Err(AppError::Unexpected(status))
        }
    }
}
