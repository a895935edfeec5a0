use cloudprint_google::{Authorization, Config};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::create_test_context;

fn config() -> Config {
    Config::new()
        .with_client_id("client-id")
        .with_client_secret("client-secret")
        .with_callback_url("https://example.com/callback")
        .with_access_type("offline")
}

#[tokio::test]
async fn test_exchange_code_returns_refresh_token() {
    let (ctx, http) = create_test_context();
    http.push_json(
        200,
        json!({
            "access_token": "ya29.code",
            "expires_in": 3600,
            "refresh_token": "1//from-code",
            "token_type": "Bearer"
        }),
    );

    let refresh_token = Authorization::from_config(&config())
        .exchange_code(&ctx, "4/auth-code")
        .await
        .unwrap();
    assert_eq!(refresh_token, "1//from-code");

    let req = &http.requests()[0];
    assert_eq!(req.uri, "https://accounts.google.com/o/oauth2/token");
    let form = req.form();
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "4/auth-code");
    assert_eq!(form["redirect_uri"], "https://example.com/callback");
}

#[tokio::test]
async fn test_exchange_code_without_refresh_token() {
    let (ctx, http) = create_test_context();
    http.push_json(200, json!({"access_token": "ya29.online", "expires_in": 3600}));

    let err = Authorization::from_config(&config())
        .exchange_code(&ctx, "4/auth-code")
        .await
        .unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_exchange_code_requires_secret() {
    let (ctx, http) = create_test_context();
    let cfg = Config::new()
        .with_client_id("client-id")
        .with_callback_url("https://example.com/callback");

    let err = Authorization::from_config(&cfg)
        .exchange_code(&ctx, "4/auth-code")
        .await
        .unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_configured_site_serves_consent_and_exchange() {
    let (ctx, http) = create_test_context();
    http.push_json(200, json!({"access_token": "ya29.code", "refresh_token": "1//local"}));

    let auth = Authorization::from_config(&config().with_oauth2_site("http://127.0.0.1:9000"));
    assert!(auth
        .authorize_url()
        .unwrap()
        .starts_with("http://127.0.0.1:9000/o/oauth2/auth?"));

    assert_eq!(
        auth.exchange_code(&ctx, "4/auth-code").await.unwrap(),
        "1//local"
    );
    assert_eq!(http.requests()[0].uri, "http://127.0.0.1:9000/o/oauth2/token");
}
