//! OAuth2 helper functions

use bytes::Bytes;
use http::{header::CONTENT_TYPE, Method, StatusCode};
use log::{debug, error};
use serde::de::DeserializeOwned;

use cloudprint_core::time::now_plus_secs;
use cloudprint_core::{Context, Error, Result};

use super::types::{ErrorResponse, TokenResponse};
use crate::credential::AccessToken;

/// Send a form-encoded OAuth2 POST request and parse the JSON response.
///
/// Every failure, including an unreachable endpoint, is reported as an
/// authentication error: the caller asked for a credential and did not get one.
pub async fn oauth2_post_form<R: DeserializeOwned>(
    ctx: &Context,
    url: &str,
    params: &[(&str, &str)],
) -> Result<R> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let req = http::Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Bytes::from(body))
        .map_err(|e| Error::authentication("failed to build token request").with_source(e))?;

    debug!("sending OAuth2 request to {url}");
    let resp = ctx.http_send(req).await.map_err(|e| {
        Error::authentication(format!("failed to reach token endpoint {url}")).with_source(e)
    })?;

    if resp.status() != StatusCode::OK {
        error!("OAuth2 request to {} failed: {:?}", url, resp.status());
        return Err(Error::authentication(format!(
            "OAuth2 request failed ({}): {}",
            resp.status(),
            describe_error(resp.body())
        )));
    }

    serde_json::from_slice(resp.body())
        .map_err(|e| Error::authentication("failed to parse OAuth2 response").with_source(e))
}

/// Convert a token response into an [`AccessToken`], rejecting empty tokens.
pub fn token_from_response(resp: &TokenResponse) -> Result<AccessToken> {
    if resp.access_token.trim().is_empty() {
        return Err(Error::authentication(
            "token endpoint returned an empty access token",
        ));
    }

    Ok(AccessToken::new(
        resp.access_token.clone(),
        resp.expires_in.map(now_plus_secs),
    ))
}

fn describe_error(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(ErrorResponse { error, .. }) => error,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}
