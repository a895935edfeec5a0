//! Google OAuth2 credential management for the cloud print client.
//!
//! Two strategies are supported and unified behind [`AuthManager::access_token`]:
//!
//! - delegated user credentials, renewed through the refresh-token grant
//! - service account keys, renewed through the signed-JWT grant

mod constants;
pub use constants::CLOUDPRINT_SCOPE_URL;

mod credential;
pub use credential::{AccessToken, AuthStrategy, OAuth2Credentials, ServiceAccount};

mod config;
pub use config::Config;

mod oauth2;

mod provide_credential;
pub use provide_credential::{RefreshTokenCredentialProvider, ServiceAccountCredentialProvider};

mod auth_manager;
pub use auth_manager::AuthManager;

mod authorize;
pub use authorize::Authorization;
