use cloudprint_core::time::{now, DateTime};
use cloudprint_core::utils::{base64_decode, Redact};
use cloudprint_core::{Error, Result, SigningCredential};
use std::fmt::{self, Debug};

/// ServiceAccount holds the client email and private key for service account authentication.
#[derive(Clone, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceAccount {
    /// Private key of credential, PEM encoded.
    pub private_key: String,
    /// The client email of credential.
    pub client_email: String,
    /// Identifier of the private key, sent as the JWT `kid` when present.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Token endpoint declared by the key file.
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &Redact::from(&self.private_key))
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccount {
    /// Parse a service account key from its JSON bytes.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        let sa: Self = serde_json::from_slice(v).map_err(|e| {
            Error::authentication("failed to parse service account credentials").with_source(e)
        })?;

        if sa.client_email.trim().is_empty() || sa.private_key.trim().is_empty() {
            return Err(Error::authentication(
                "service account credentials missing client_email or private_key",
            ));
        }

        Ok(sa)
    }

    /// Parse a service account key from either raw JSON or base64-encoded JSON.
    pub fn from_content(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            Self::from_slice(trimmed.as_bytes())
        } else {
            Self::from_slice(&base64_decode(trimmed)?)
        }
    }
}

/// OAuth2 user credentials used by the delegated refresh-token flow.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuth2Credentials {
    /// The client ID.
    pub client_id: String,
    /// The client secret.
    pub client_secret: String,
    /// The refresh token.
    pub refresh_token: String,
}

impl Debug for OAuth2Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .finish()
    }
}

/// AccessToken represents a bearer token with its expiry instant.
///
/// Tokens are replaced wholesale on renewal and never mutated in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token.
    pub access_token: String,
    /// The expiration time of the token, `None` if the provider did not report one.
    pub expires_at: Option<DateTime>,
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    /// Create a new token.
    pub fn new(access_token: impl Into<String>, expires_at: Option<DateTime>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Check whether the expiry instant has been reached.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now() >= expires_at,
            None => false,
        }
    }
}

impl SigningCredential for AccessToken {
    fn is_valid(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.is_expired()
    }
}

/// AuthStrategy is the authentication mode of a client, fixed at construction.
#[derive(Clone, Debug)]
pub enum AuthStrategy {
    /// Signed-JWT exchange with a service account key.
    ServiceAccount(ServiceAccount),
    /// Refresh-token exchange on behalf of a user.
    DelegatedRefresh(OAuth2Credentials),
}

impl AuthStrategy {
    /// Check if this is the service account strategy.
    pub fn is_service_account(&self) -> bool {
        matches!(self, AuthStrategy::ServiceAccount(_))
    }
}
