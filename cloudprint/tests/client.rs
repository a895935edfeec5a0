use cloudprint::{Client, Config, Context, ErrorKind};
use cloudprint_core::StaticEnv;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{create_test_client, create_test_context, delegated_config};

fn service_account_json() -> String {
    json!({
        "type": "service_account",
        "private_key_id": "test-key-id",
        "private_key": include_str!("../testdata/test_key.pem"),
        "client_email": "printer@cloudprint-test.iam.gserviceaccount.com",
        "token_uri": "https://oauth2.googleapis.com/token"
    })
    .to_string()
}

#[test]
fn test_client_exposes_config() {
    let (client, http) = create_test_client();

    assert_eq!(client.client_id(), Some("client-id"));
    assert_eq!(client.client_secret(), Some("client-secret"));
    assert_eq!(client.refresh_token().as_deref(), Some("1//refresh"));
    assert_eq!(
        client.callback_url(),
        Some("https://app.example.com/callback")
    );
    assert_eq!(client.access_type(), None);
    assert!(!client.is_service_account());
    assert!(!client.is_access_token_valid());
    assert_eq!(http.request_count(), 0);
}

#[test]
fn test_client_from_env() {
    let ctx = Context::new().with_env(
        StaticEnv::default()
            .with_var("CLOUDPRINT_CLIENT_ID", "env-client")
            .with_var("CLOUDPRINT_CLIENT_SECRET", "env-secret")
            .with_var("CLOUDPRINT_REFRESH_TOKEN", "1//env")
            .with_var("CLOUDPRINT_ACCESS_TYPE", "offline"),
    );

    let client = Client::from_env(ctx).unwrap();
    assert_eq!(client.client_id(), Some("env-client"));
    assert_eq!(client.refresh_token().as_deref(), Some("1//env"));
    assert_eq!(client.access_type(), Some("offline"));
    assert!(!client.is_service_account());
}

#[tokio::test]
async fn test_access_token() {
    let (client, http) = create_test_client();

    assert_eq!(client.access_token().await.unwrap(), "ya29.token");
    assert!(client.is_access_token_valid());
    assert_eq!(client.access_token().await.unwrap(), "ya29.token");
    assert_eq!(http.request_count(), 1);
}

#[tokio::test]
async fn test_set_refresh_token_renews_eagerly() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"access_token": "ya29.second", "expires_in": 3600}));

    assert_eq!(client.access_token().await.unwrap(), "ya29.token");

    client.set_refresh_token("1//replaced").await.unwrap();
    assert_eq!(http.request_count(), 2);
    assert_eq!(http.last_request().form()["refresh_token"], "1//replaced");
    assert_eq!(client.refresh_token().as_deref(), Some("1//replaced"));
    assert!(client.is_access_token_valid());

    // No further exchange is needed right after the eager renewal.
    assert_eq!(client.access_token().await.unwrap(), "ya29.second");
    assert_eq!(http.request_count(), 2);
}

#[tokio::test]
async fn test_set_refresh_token_failure() {
    let (client, http) = create_test_client();
    http.push_json(400, json!({"error": "invalid_grant"}));

    client.access_token().await.unwrap();
    let err = client.set_refresh_token("1//revoked").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(!client.is_access_token_valid());
}

#[tokio::test]
async fn test_clones_share_token() {
    let (client, http) = create_test_client();
    let cloned = client.clone();

    client.access_token().await.unwrap();
    assert!(cloned.is_access_token_valid());
    assert_eq!(cloned.access_token().await.unwrap(), "ya29.token");
    assert_eq!(http.request_count(), 1);
}

#[tokio::test]
async fn test_clone_sees_replaced_refresh_token() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"access_token": "ya29.second", "expires_in": 3600}));
    let cloned = client.clone();

    client.set_refresh_token("1//replaced").await.unwrap();
    assert_eq!(cloned.refresh_token().as_deref(), Some("1//replaced"));

    cloned.auth_manager().invalidate();
    assert_eq!(cloned.access_token().await.unwrap(), "ya29.second");
    assert_eq!(http.last_request().form()["refresh_token"], "1//replaced");
}

#[test]
fn test_authorize_url() {
    let (client, _) = create_test_client();

    let url = client.auth().authorize_url().unwrap();
    assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
    assert!(url.contains("client_id=client-id"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"));
}

#[tokio::test]
async fn test_authorize() {
    let (ctx, http) = create_test_context();
    http.push_json(
        200,
        json!({"access_token": "ya29.code", "expires_in": 3600, "refresh_token": "1//granted"}),
    )
    .push_json(200, json!({"access_token": "ya29.renewed", "expires_in": 3600}));

    let config = Config {
        refresh_token: None,
        ..delegated_config()
    };
    let client = Client::new(ctx, config).unwrap();
    client.authorize("4/code").await.unwrap();

    assert_eq!(client.refresh_token().as_deref(), Some("1//granted"));
    assert_eq!(client.access_token().await.unwrap(), "ya29.renewed");

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].form()["grant_type"], "authorization_code");
    assert_eq!(requests[0].form()["code"], "4/code");
    assert_eq!(requests[1].form()["grant_type"], "refresh_token");
    assert_eq!(requests[1].form()["refresh_token"], "1//granted");
}

#[test]
fn test_invalid_service_account() {
    let (ctx, http) = create_test_context();
    let config = delegated_config().with_service_account_credentials("{not json");

    let err = Client::new(ctx, config).unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_service_account_client() {
    let (ctx, http) = create_test_context();
    http.push_json(200, json!({"access_token": "ya29.sa", "expires_in": 3600}))
        .push_json(200, json!({"jobs": [{"id": "job-1", "status": "SUBMITTED"}]}));

    let config = Config::new().with_service_account_credentials(service_account_json());
    let client = Client::new(ctx, config).unwrap();
    assert!(client.is_service_account());
    assert_eq!(client.refresh_token(), None);

    let jobs = client.print_jobs().all().await.unwrap();
    assert!(jobs[0].is_submitted());

    let requests = http.requests();
    assert_eq!(requests[0].uri, "https://oauth2.googleapis.com/token");
    assert_eq!(
        requests[0].form()["grant_type"],
        "urn:ietf:params:oauth:grant-type:jwt-bearer"
    );
    assert_eq!(requests[1].bearer(), Some("ya29.sa"));
}
