use jsonwebtoken::{Algorithm, EncodingKey, Header as JwtHeader};
use log::debug;
use serde::Serialize;

use cloudprint_core::{time::now, Context, Error, ProvideCredential, Result};

use crate::constants::{
    CLOUDPRINT_SCOPE_URL, JWT_BEARER_GRANT_TYPE, JWT_LIFETIME_SECS, SERVICE_ACCOUNT_TOKEN_URL,
};
use crate::credential::{AccessToken, ServiceAccount};
use crate::oauth2::helpers::{oauth2_post_form, token_from_response};
use crate::oauth2::types::TokenResponse;

/// Claims is the JWT assertion presented to the token endpoint.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    exp: u64,
    iat: u64,
}

impl Claims {
    fn new(client_email: &str, scope: &str, aud: &str) -> Self {
        let current = now().timestamp().max(0) as u64;

        Claims {
            iss: client_email.to_string(),
            scope: scope.to_string(),
            aud: aud.to_string(),
            exp: current + JWT_LIFETIME_SECS,
            iat: current,
        }
    }
}

/// ServiceAccountCredentialProvider exchanges a signed JWT for an access token.
#[derive(Debug, Clone)]
pub struct ServiceAccountCredentialProvider {
    service_account: ServiceAccount,
    scope: String,
}

impl ServiceAccountCredentialProvider {
    /// Create a new provider scoped to the print service.
    pub fn new(service_account: ServiceAccount) -> Self {
        Self {
            service_account,
            scope: CLOUDPRINT_SCOPE_URL.to_string(),
        }
    }

    /// Set the OAuth2 scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    fn token_url(&self) -> &str {
        self.service_account
            .token_uri
            .as_deref()
            .unwrap_or(SERVICE_ACCOUNT_TOKEN_URL)
    }

    fn assertion(&self) -> Result<String> {
        let sa = &self.service_account;

        let mut header = JwtHeader::new(Algorithm::RS256);
        header.kid = sa.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(sa.private_key.as_bytes()).map_err(|e| {
            Error::authentication("failed to parse service account private key").with_source(e)
        })?;

        jsonwebtoken::encode(
            &header,
            &Claims::new(&sa.client_email, &self.scope, self.token_url()),
            &key,
        )
        .map_err(|e| Error::authentication("failed to sign JWT assertion").with_source(e))
    }
}

#[async_trait::async_trait]
impl ProvideCredential for ServiceAccountCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Self::Credential> {
        debug!(
            "exchanging service account {} for token with scope: {}",
            self.service_account.client_email, self.scope
        );

        let jwt = self.assertion()?;
        let resp: TokenResponse = oauth2_post_form(
            ctx,
            self.token_url(),
            &[("grant_type", JWT_BEARER_GRANT_TYPE), ("assertion", &jwt)],
        )
        .await?;

        token_from_response(&resp)
    }
}
