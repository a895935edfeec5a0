use std::sync::{Arc, Mutex};

use log::debug;

use cloudprint_core::{Context, ProvideCredential, Result, SigningCredential};

use crate::config::Config;
use crate::constants::{CLOUDPRINT_SCOPE_URL, OAUTH2_SITE, OAUTH2_TOKEN_PATH};
use crate::credential::{AccessToken, AuthStrategy};
use crate::provide_credential::{RefreshTokenCredentialProvider, ServiceAccountCredentialProvider};

/// AuthManager hands out a currently-valid access token, renewing it lazily.
///
/// The cached token is checked against the wall clock on every read and is
/// only renewed when that check fails. There is no background refresh.
///
/// Clones share the same token cache. The cache is meant for sequential use:
/// two tasks racing on an expired token may both renew it.
#[derive(Clone, Debug)]
pub struct AuthManager {
    ctx: Context,
    scope: String,
    token_url: String,
    strategy: Arc<Mutex<AuthStrategy>>,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl AuthManager {
    /// Create a new auth manager for the given strategy.
    pub fn new(ctx: Context, strategy: AuthStrategy) -> Self {
        Self {
            ctx,
            scope: CLOUDPRINT_SCOPE_URL.to_string(),
            token_url: format!("{OAUTH2_SITE}{OAUTH2_TOKEN_PATH}"),
            strategy: Arc::new(Mutex::new(strategy)),
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a new auth manager from config.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        Ok(Self::new(ctx, config.strategy()?)
            .with_scope(config.scope())
            .with_oauth2_site(config.oauth2_site()))
    }

    /// Send refresh-token exchanges to another OAuth2 provider host.
    ///
    /// The service account exchange keeps using the key's own `token_uri`.
    pub fn with_oauth2_site(mut self, site: &str) -> Self {
        self.token_url = format!("{}{OAUTH2_TOKEN_PATH}", site.trim_end_matches('/'));
        self
    }

    /// Set the OAuth2 scope used by the service account exchange.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Whether this manager runs the service account strategy.
    pub fn is_service_account(&self) -> bool {
        self.strategy
            .lock()
            .expect("lock poisoned")
            .is_service_account()
    }

    /// The refresh token the next delegated exchange will use.
    ///
    /// `None` in service account mode or when no refresh token is set.
    pub fn refresh_token(&self) -> Option<String> {
        match &*self.strategy.lock().expect("lock poisoned") {
            AuthStrategy::DelegatedRefresh(creds) if !creds.refresh_token.is_empty() => {
                Some(creds.refresh_token.clone())
            }
            _ => None,
        }
    }

    /// The currently cached token, valid or not.
    pub fn cached_token(&self) -> Option<AccessToken> {
        self.token.lock().expect("lock poisoned").clone()
    }

    /// Check whether the cached token can be used right now.
    pub fn is_valid(&self) -> bool {
        self.token.lock().expect("lock poisoned").is_valid()
    }

    /// Drop the cached token so the next read renews it.
    pub fn invalidate(&self) {
        *self.token.lock().expect("lock poisoned") = None;
    }

    /// Return the cached token if it is still valid, otherwise renew it first.
    pub async fn access_token(&self) -> Result<String> {
        let cached = self.cached_token();
        if let Some(token) = cached.filter(|t| t.is_valid()) {
            return Ok(token.access_token);
        }

        debug!("access token missing or expired, renewing");
        self.renew().await
    }

    /// Renew the access token unconditionally and replace the cached one.
    ///
    /// On failure the cache is left empty so a stale token is never served.
    pub async fn renew(&self) -> Result<String> {
        self.invalidate();

        let strategy = self.strategy.lock().expect("lock poisoned").clone();
        let token = match strategy {
            AuthStrategy::ServiceAccount(sa) => {
                ServiceAccountCredentialProvider::new(sa)
                    .with_scope(&self.scope)
                    .provide_credential(&self.ctx)
                    .await?
            }
            AuthStrategy::DelegatedRefresh(creds) => {
                RefreshTokenCredentialProvider::new(creds)
                    .with_token_url(&self.token_url)
                    .provide_credential(&self.ctx)
                    .await?
            }
        };

        debug!("access token renewed, expires at {:?}", token.expires_at);
        let access_token = token.access_token.clone();
        *self.token.lock().expect("lock poisoned") = Some(token);
        Ok(access_token)
    }

    /// Replace the refresh token and renew eagerly.
    ///
    /// The previous access token is discarded before the exchange, even if
    /// the exchange then fails. In service account mode the refresh token is
    /// not used by the exchange, but the token is still renewed.
    pub async fn set_refresh_token(&self, refresh_token: impl Into<String>) -> Result<String> {
        let refresh_token = refresh_token.into();
        {
            let mut strategy = self.strategy.lock().expect("lock poisoned");
            match &mut *strategy {
                AuthStrategy::DelegatedRefresh(creds) => creds.refresh_token = refresh_token,
                AuthStrategy::ServiceAccount(_) => {
                    debug!("refresh token replaced while in service account mode");
                }
            }
        }

        self.renew().await
    }
}
