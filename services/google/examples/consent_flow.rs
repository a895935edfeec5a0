//! Walk through the user consent flow and print a refresh token.
//!
//! ```shell
//! CLOUDPRINT_CLIENT_ID=... CLOUDPRINT_CLIENT_SECRET=... \
//! CLOUDPRINT_CALLBACK_URL=urn:ietf:wg:oauth:2.0:oob CLOUDPRINT_ACCESS_TYPE=offline \
//!     cargo run --example consent_flow
//! ```

use std::io::BufRead;

use anyhow::Result;
use cloudprint_core::{Context, OsEnv};
use cloudprint_google::{AuthManager, Authorization, Config};
use cloudprint_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::from_env(&ctx);

    let auth = Authorization::from_config(&config);
    println!("Open this URL and paste the code below:\n{}", auth.authorize_url()?);

    let mut code = String::new();
    std::io::stdin().lock().read_line(&mut code)?;

    let refresh_token = auth.exchange_code(&ctx, code.trim()).await?;
    println!("refresh token: {refresh_token}");

    let manager = AuthManager::from_config(ctx, &config.with_refresh_token(refresh_token))?;
    let token = manager.access_token().await?;
    println!("access token obtained ({} chars)", token.len());

    Ok(())
}
