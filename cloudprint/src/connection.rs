use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode};
use log::{debug, error};
use serde_json::Value;

use cloudprint_core::{Context, Error, Result};
use cloudprint_google::AuthManager;

/// Base URL of the print service REST API.
pub const DEFAULT_BASE_URL: &str = "https://www.google.com/cloudprint";

const PROXY_HEADER: &str = "x-cloudprint-proxy";
const PROXY_HEADER_VALUE: &str = "cloudprint-rs";

/// Connection performs authorized calls against the print service.
///
/// Every call first asks the [`AuthManager`] for a valid token, which may
/// renew it, and only then issues the request.
#[derive(Clone, Debug)]
pub struct Connection {
    ctx: Context,
    auth: AuthManager,
    base_url: String,
}

impl Connection {
    /// Create a new connection against [`DEFAULT_BASE_URL`].
    pub fn new(ctx: Context, auth: AuthManager) -> Self {
        Self {
            ctx,
            auth,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the print service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The print service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with the given query parameters.
    ///
    /// Returns `None` when the service answers with an empty body.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<Value>> {
        let mut url = self.url(path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode(query));
        }

        self.send(Method::GET, url, None).await
    }

    /// POST `path` with a form-encoded body.
    ///
    /// Returns `None` when the service answers with an empty body.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<Option<Value>> {
        let url = self.url(path);
        self.send(Method::POST, url, Some(encode(form))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        form: Option<String>,
    ) -> Result<Option<Value>> {
        let token = self.auth.access_token().await?;

        let mut authorization = HeaderValue::try_from(format!("Bearer {token}")).map_err(|e| {
            Error::authentication("access token is not a valid header value").with_source(e)
        })?;
        authorization.set_sensitive(true);

        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(AUTHORIZATION, authorization)
            .header(PROXY_HEADER, PROXY_HEADER_VALUE);
        if form.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        let req = builder
            .body(form.map(Bytes::from).unwrap_or_default())
            .map_err(|e| {
                Error::connection(format!("failed to build {method} {url}")).with_source(e)
            })?;

        debug!("{method} {url}");
        let resp = self
            .ctx
            .http_send(req)
            .await
            .map_err(|e| Error::connection(format!("{method} {url} failed")).with_source(e))?;

        let status = resp.status();
        if !status.is_success() {
            error!("{method} {url} got unexpected status: {status}");
            if status == StatusCode::UNAUTHORIZED {
                // The token was rejected before its expiry; make the next call renew it.
                self.auth.invalidate();
            }
            return Err(Error::connection(format!(
                "{method} {url} failed ({status}): {}",
                String::from_utf8_lossy(resp.body())
            )));
        }

        parse_body(resp.body()).map_err(|e| {
            let message = format!("{method} {url}: {}", e.message());
            Error::connection(message).with_source(e)
        })
    }
}

fn encode(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn parse_body(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::connection("failed to parse response body").with_source(e))?;

    if value.get("success") == Some(&Value::Bool(false)) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request was not successful");
        return Err(Error::connection(message.to_string()));
    }

    Ok(Some(value))
}
