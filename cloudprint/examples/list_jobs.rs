//! List print jobs and printers using credentials from `CLOUDPRINT_*` environment variables.
//!
//! ```shell
//! CLOUDPRINT_CLIENT_ID=... CLOUDPRINT_CLIENT_SECRET=... CLOUDPRINT_REFRESH_TOKEN=... \
//!     cargo run --example list_jobs
//! ```

use anyhow::Result;
use cloudprint::{default_context, Client};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = Client::from_env(default_context())?;
    if client.is_service_account() {
        println!("authenticating with a service account");
    }

    for printer in client.printers().all().await? {
        let name = printer.display_name.as_deref().unwrap_or(&printer.name);
        let state = if printer.is_online() { "online" } else { "offline" };
        println!("printer {} ({name}): {state}", printer.id);
    }

    for job in client.print_jobs().all().await? {
        match job.error_code() {
            Some(code) => println!("job {}: {} ({code})", job.id(), job.status()),
            None => println!("job {}: {}", job.id(), job.status()),
        }
    }

    Ok(())
}
