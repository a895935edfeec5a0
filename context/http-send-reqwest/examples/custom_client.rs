use anyhow::Result;
use bytes::Bytes;
use cloudprint_core::Context;
use cloudprint_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // The core leaves timeouts to the transport, so configure them here.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(4)
        .user_agent("cloudprint-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let url = "https://accounts.google.com/.well-known/openid-configuration";
    println!("GET {url}");

    let req = http::Request::builder()
        .method(http::Method::GET)
        .uri(url)
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("status: {}", resp.status());
            println!("body length: {} bytes", resp.body().len());
        }
        Err(e) => println!("request failed: {e}"),
    }

    Ok(())
}
