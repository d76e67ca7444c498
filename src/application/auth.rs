/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Provider session handling
//!
//! The quoteSummary endpoint only answers requests that carry a session
//! cookie and the matching crumb. The cookie is set by visiting the cookie
//! URL; the crumb is then read from `/v1/test/getcrumb` with that cookie in
//! the jar. Both are cached and refreshed when the provider answers 401.

use crate::application::config::ProviderConfig;
use crate::error::AppError;
use crate::model::http::HttpClient;
use crate::model::requests::crumb_url;
use chrono::{DateTime, Utc};
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Cookie-backed provider session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Crumb to send with authenticated requests
    pub crumb: String,
    /// When the crumb was obtained
    pub obtained_at: DateTime<Utc>,
}

/// Obtains and caches the provider session
#[derive(Debug, Clone)]
pub struct Auth {
    config: Arc<ProviderConfig>,
    http: HttpClient,
    session: Arc<RwLock<Option<Session>>>,
}

impl Auth {
    /// Creates the session manager; no request is made until first use
    pub fn new(config: Arc<ProviderConfig>, http: HttpClient) -> Self {
        Self {
            config,
            http,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the cached session, logging in first when there is none
    pub async fn get_session(&self) -> Result<Session, AppError> {
        if let Some(session) = self.session.read().await.as_ref() {
            return Ok(session.clone());
        }

        let mut guard = self.session.write().await;
        // another request may have logged in while we waited for the lock
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let session = self.login().await?;
        *guard = Some(session.clone());
        Ok(session)
    }

    /// Replaces `rejected` with a fresh session
    ///
    /// When another request already swapped the cached session while this
    /// one waited for the lock, that newer session is returned without
    /// logging in again.
    pub async fn refresh(&self, rejected: &Session) -> Result<Session, AppError> {
        let mut guard = self.session.write().await;
        if let Some(current) = guard.as_ref() {
            if current != rejected {
                debug!("Provider session already refreshed by another request");
                return Ok(current.clone());
            }
        }

        warn!("Provider session rejected, obtaining a new crumb");
        *guard = None;
        let session = self.login().await?;
        *guard = Some(session.clone());
        Ok(session)
    }

    async fn login(&self) -> Result<Session, AppError> {
        let cookie_url = Url::parse(&self.config.cookie_url).map_err(|e| {
            AppError::InvalidInput(format!("invalid cookie url {}: {e}", self.config.cookie_url))
        })?;
        self.http.visit(cookie_url).await?;

        let crumb = self
            .http
            .get_text(crumb_url(&self.config.base_url)?)
            .await?
            .trim()
            .to_string();

        if crumb.is_empty() || crumb.contains('<') {
            return Err(AppError::Provider(
                "provider did not hand out a crumb".to_string(),
            ));
        }

        debug!("Obtained provider crumb ({} chars)", crumb.len());
        info!("Provider session established");
        Ok(Session {
            crumb,
            obtained_at: Utc::now(),
        })
    }
}
