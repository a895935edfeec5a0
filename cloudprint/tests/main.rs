
mod client;
mod print_jobs;

use cloudprint::{Client, Config, Context};
use mock::MockHttpSend;
use serde_json::json;

pub fn create_test_context() -> (Context, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new();
    let ctx = Context::new().with_http_send(http.clone());
    (ctx, http)
}

pub fn delegated_config() -> Config {
    Config::new()
        .with_client_id("client-id")
        .with_client_secret("client-secret")
        .with_refresh_token("1//refresh")
        .with_callback_url("https://app.example.com/callback")
}

/// A delegated client whose first token exchange is already queued.
pub fn create_test_client() -> (Client, MockHttpSend) {
    let (ctx, http) = create_test_context();
    http.push_json(
        200,
        json!({"access_token": "ya29.token", "expires_in": 3600, "token_type": "Bearer"}),
    );

    let client = Client::new(ctx, delegated_config()).unwrap();
    (client, http)
}
