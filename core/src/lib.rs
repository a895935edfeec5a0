//! Core components for the cloud print client.
//!
//! This crate provides the foundational types and traits shared by the
//! credential providers and the print service client.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Traits**: Abstract interfaces for credential acquisition (`ProvideCredential`) and
//!   credential validity (`SigningCredential`)
//! - **Error**: The error taxonomy every operation reports through
//!
//! ## Example
//!
//! ```no_run
//! use cloudprint_core::{Context, ProvideCredential, Result, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct StaticToken(String);
//!
//! impl SigningCredential for StaticToken {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct StaticProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for StaticProvider {
//!     type Credential = StaticToken;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Self::Credential> {
//!         Ok(StaticToken("token".to_string()))
//!     }
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SigningCredential};
