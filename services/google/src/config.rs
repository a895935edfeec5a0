use std::fmt::{self, Debug};

use cloudprint_core::utils::Redact;
use cloudprint_core::{Context, Result};

use crate::constants::*;
use crate::credential::{AuthStrategy, OAuth2Credentials, ServiceAccount};

/// Config carries all the configuration for authenticating against the print service.
///
/// Exactly one authentication mode is derived from it: service account when
/// `service_account_credentials` is set, delegated refresh token otherwise.
#[derive(Clone, Default)]
pub struct Config {
    /// OAuth2 client ID.
    pub client_id: Option<String>,
    /// OAuth2 client secret.
    pub client_secret: Option<String>,
    /// Long-lived refresh token obtained through the consent flow.
    pub refresh_token: Option<String>,
    /// Redirect URI registered for the consent flow.
    pub callback_url: Option<String>,
    /// `access_type` passed to the consent flow, e.g. `offline`.
    pub access_type: Option<String>,
    /// Service account key content, raw or base64-encoded JSON.
    pub service_account_credentials: Option<String>,
    /// Scope for OAuth2 token requests.
    pub scope: Option<String>,
    /// OAuth2 provider host serving both the consent page and the token endpoint.
    pub oauth2_site: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .field("callback_url", &self.callback_url)
            .field("access_type", &self.access_type)
            .field(
                "service_account_credentials",
                &Redact::from(&self.service_account_credentials),
            )
            .field("scope", &self.scope)
            .field("oauth2_site", &self.oauth2_site)
            .finish()
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OAuth2 client ID.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the OAuth2 client secret.
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the consent flow redirect URI.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// Set the consent flow access type.
    pub fn with_access_type(mut self, access_type: impl Into<String>) -> Self {
        self.access_type = Some(access_type.into());
        self
    }

    /// Set the service account key content.
    pub fn with_service_account_credentials(mut self, content: impl Into<String>) -> Self {
        self.service_account_credentials = Some(content.into());
        self
    }

    /// Set the OAuth2 scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the OAuth2 provider host, e.g. a local stand-in for tests.
    pub fn with_oauth2_site(mut self, site: impl Into<String>) -> Self {
        self.oauth2_site = Some(site.into());
        self
    }

    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            client_id: ctx.env_var(CLOUDPRINT_CLIENT_ID),
            client_secret: ctx.env_var(CLOUDPRINT_CLIENT_SECRET),
            refresh_token: ctx.env_var(CLOUDPRINT_REFRESH_TOKEN),
            callback_url: ctx.env_var(CLOUDPRINT_CALLBACK_URL),
            access_type: ctx.env_var(CLOUDPRINT_ACCESS_TYPE),
            service_account_credentials: ctx.env_var(CLOUDPRINT_SERVICE_ACCOUNT_CREDENTIALS),
            scope: ctx.env_var(CLOUDPRINT_SCOPE),
            oauth2_site: None,
        }
    }

    /// The effective OAuth2 scope.
    pub fn scope(&self) -> &str {
        self.scope.as_deref().unwrap_or(CLOUDPRINT_SCOPE_URL)
    }

    /// The effective OAuth2 provider host, without a trailing slash.
    pub fn oauth2_site(&self) -> &str {
        self.oauth2_site
            .as_deref()
            .unwrap_or(OAUTH2_SITE)
            .trim_end_matches('/')
    }

    /// Whether this config selects the service account mode.
    pub fn is_service_account(&self) -> bool {
        self.service_account_credentials
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }

    /// Derive the authentication strategy.
    ///
    /// Fails with an authentication error when service account content is
    /// present but cannot be parsed.
    pub fn strategy(&self) -> Result<AuthStrategy> {
        match &self.service_account_credentials {
            Some(content) if self.is_service_account() => Ok(AuthStrategy::ServiceAccount(
                ServiceAccount::from_content(content)?,
            )),
            _ => Ok(AuthStrategy::DelegatedRefresh(OAuth2Credentials {
                client_id: self.client_id.clone().unwrap_or_default(),
                client_secret: self.client_secret.clone().unwrap_or_default(),
                refresh_token: self.refresh_token.clone().unwrap_or_default(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudprint_core::StaticEnv;

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_iter([
            (CLOUDPRINT_CLIENT_ID, "client-id"),
            (CLOUDPRINT_CLIENT_SECRET, "client-secret"),
            (CLOUDPRINT_REFRESH_TOKEN, "1//refresh"),
            (CLOUDPRINT_ACCESS_TYPE, "offline"),
            (CLOUDPRINT_CALLBACK_URL, ""),
        ]));

        let cfg = Config::from_env(&ctx);
        assert_eq!(cfg.client_id.as_deref(), Some("client-id"));
        assert_eq!(cfg.access_type.as_deref(), Some("offline"));
        assert_eq!(cfg.callback_url, None);
        assert_eq!(cfg.scope(), CLOUDPRINT_SCOPE_URL);
        assert!(!cfg.is_service_account());

        match cfg.strategy().unwrap() {
            AuthStrategy::DelegatedRefresh(creds) => {
                assert_eq!(creds.client_id, "client-id");
                assert_eq!(creds.client_secret, "client-secret");
                assert_eq!(creds.refresh_token, "1//refresh");
            }
            AuthStrategy::ServiceAccount(_) => panic!("Expected DelegatedRefresh"),
        }
    }

    #[test]
    fn test_config_service_account_strategy() {
        let cfg = Config::new()
            .with_refresh_token("ignored")
            .with_service_account_credentials(
                r#"{"private_key": "key", "client_email": "printer@example.com"}"#,
            );
        assert!(cfg.is_service_account());

        match cfg.strategy().unwrap() {
            AuthStrategy::ServiceAccount(sa) => {
                assert_eq!(sa.client_email, "printer@example.com");
            }
            AuthStrategy::DelegatedRefresh(_) => panic!("Expected ServiceAccount"),
        }

        let cfg = Config::new().with_service_account_credentials("{}");
        assert!(cfg.strategy().unwrap_err().is_authentication());
    }

    #[test]
    fn test_config_blank_service_account_is_delegated() {
        let cfg = Config::new().with_service_account_credentials("  ");
        assert!(!cfg.is_service_account());
        assert!(!cfg.strategy().unwrap().is_service_account());
    }

    #[test]
    fn test_config_oauth2_site() {
        assert_eq!(Config::new().oauth2_site(), "https://accounts.google.com");
        assert_eq!(
            Config::new()
                .with_oauth2_site("http://127.0.0.1:9000/")
                .oauth2_site(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_config_debug_redacts() {
        let cfg = Config::new()
            .with_client_secret("client-secret-value")
            .with_refresh_token("1//refresh-token-value");
        let output = format!("{cfg:?}");
        assert!(!output.contains("secret-value"));
        assert!(!output.contains("refresh-token"));
    }
}
