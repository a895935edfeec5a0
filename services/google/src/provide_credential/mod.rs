mod refresh_token;
pub use refresh_token::RefreshTokenCredentialProvider;

mod service_account;
pub use service_account::ServiceAccountCredentialProvider;
