//! OAuth2 wire helpers shared by the token providers and the consent flow.

pub mod helpers;
pub mod types;
