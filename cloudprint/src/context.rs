use cloudprint_core::{Context, OsEnv};
use cloudprint_http_send_reqwest::ReqwestHttpSend;

/// Create a [`Context`] that sends requests with a default `reqwest` client
/// and reads configuration from the process environment.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Like [`default_context`] but with a preconfigured `reqwest` client, e.g. to set timeouts.
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}
