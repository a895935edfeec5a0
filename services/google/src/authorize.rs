use log::debug;

use cloudprint_core::{Context, Error, Result};

use crate::config::Config;
use crate::constants::{OAUTH2_AUTHORIZE_PATH, OAUTH2_TOKEN_PATH};
use crate::oauth2::helpers::oauth2_post_form;
use crate::oauth2::types::TokenResponse;

/// Authorization drives the user consent flow that yields a refresh token.
#[derive(Debug, Clone)]
pub struct Authorization {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    access_type: Option<String>,
    scope: String,
    site: String,
}

impl Authorization {
    /// Build the consent helper from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.callback_url.clone(),
            access_type: config.access_type.clone(),
            scope: config.scope().to_string(),
            site: config.oauth2_site().to_string(),
        }
    }

    /// Override the OAuth2 provider host.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the URL the user visits to grant consent.
    pub fn authorize_url(&self) -> Result<String> {
        let client_id = required(&self.client_id, "client id")?;
        let redirect_uri = required(&self.redirect_uri, "callback url")?;

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &self.scope);
        if let Some(access_type) = &self.access_type {
            query.append_pair("access_type", access_type);
        }

        Ok(format!(
            "{}{}?{}",
            self.site,
            OAUTH2_AUTHORIZE_PATH,
            query.finish()
        ))
    }

    /// Exchange an authorization code for a refresh token.
    pub async fn exchange_code(&self, ctx: &Context, code: &str) -> Result<String> {
        let client_id = required(&self.client_id, "client id")?;
        let client_secret = required(&self.client_secret, "client secret")?;
        let redirect_uri = required(&self.redirect_uri, "callback url")?;

        debug!("exchanging authorization code for refresh token");
        let resp: TokenResponse = oauth2_post_form(
            ctx,
            &format!("{}{}", self.site, OAUTH2_TOKEN_PATH),
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("redirect_uri", redirect_uri),
                ("scope", &self.scope),
            ],
        )
        .await?;

        resp.refresh_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                Error::authentication(
                    "token endpoint returned no refresh token, request offline access",
                )
            })
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::authentication(format!("{name} not configured")))
}
