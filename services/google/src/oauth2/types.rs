//! OAuth2 type definitions.

use serde::Deserialize;

/// Token endpoint response shared by the refresh-token, JWT-bearer and
/// authorization-code grants.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token issued by the authorization server.
    #[serde(default)]
    pub access_token: String,

    /// The lifetime in seconds of the access token.
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// The type of token issued (typically "Bearer").
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,

    /// Only returned by the authorization-code grant with offline access.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error body returned by the token endpoint on rejected grants.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Machine readable error code, e.g. `invalid_grant`.
    pub error: String,

    /// Human readable description.
    #[serde(default)]
    pub error_description: Option<String>,
}
