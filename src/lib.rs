//! Signed application-submission client.
//!
//! This crate implements only the critical submit flow:
//! - resolve identity and CI-run context from the environment
//! - serialize the payload as canonical JSON (sorted keys, no whitespace)
//! - sign the bytes with HMAC-SHA256 and attach `X-Signature-256`
//! - POST once, validate the response, return the server-issued receipt
//!
//! The canonical bytes feed the signature, so the encoding is bit-exact and
//! deterministic; any serialization drift breaks verification on the
//! receiving end.

pub mod canonical;
pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod signature;

pub use client::{DEFAULT_TIMEOUT, Receipt, SubmissionClient};
pub use config::SubmissionContext;
pub use error::{Diagnostics, Error, Kind as ErrorKind};
pub use payload::Payload;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Where submissions go unless the caller says otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://b12.io/apply/submission";
