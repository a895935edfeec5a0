//! Client for a cloud print service.
//!
//! [`Client`] holds the credentials and hands a currently-valid access
//! token to every request. Tokens are renewed lazily when a read finds the
//! cached one expired, through either the delegated refresh-token grant or
//! the service account signed-JWT grant.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use cloudprint_core::{Context, Error, ErrorKind, Result};
pub use cloudprint_google::{AccessToken, AuthManager, AuthStrategy, Authorization, Config};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_context_with_client};

mod connection;
pub use connection::{Connection, DEFAULT_BASE_URL};

mod print_job;
pub use print_job::{PrintJob, PrintJobCollection, PrintJobStatus};

mod printer;
pub use printer::{PrintRequest, Printer, PrinterCollection};

mod client;
pub use client::Client;
