//! Blocking submission client: sign the canonical body, POST it once,
//! validate the receipt.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::error::{Diagnostics, Error};
use crate::payload::Payload;
use crate::{Result, canonical, signature};

/// Upper bound on the whole exchange, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque acknowledgment token returned by the remote service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt(String);

impl Receipt {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    receipt: String,
}

/// One-shot signed-submission client.
#[derive(Clone, Debug)]
pub struct SubmissionClient {
    endpoint: Url,
    client: HttpClient,
}

impl SubmissionClient {
    /// Creates a client for `endpoint` with the default 30-second bound.
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a caller-chosen exchange bound.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self> {
        Self::from_builder(endpoint, HttpClient::builder().timeout(timeout))
    }

    // Construction happens before any request leaves, so a builder failure
    // is a validation error, not a submission one.
    fn from_builder(endpoint: Url, builder: reqwest::blocking::ClientBuilder) -> Result<Self> {
        let client = builder
            .build()
            .map_err(|err| Error::validation(format!("failed to construct HTTP client: {err}")))?;
        Ok(Self { endpoint, client })
    }

    /// Signs and submits the payload, returning the server-issued receipt.
    ///
    /// Exactly one request is made; there are no retries. Every failure
    /// after signing carries [`Diagnostics`] with the action-run link and a
    /// masked signature prefix, and is reported as [`Kind::Submission`].
    ///
    /// [`Kind::Submission`]: crate::ErrorKind::Submission
    pub fn submit(&self, payload: &Payload, secret: &SecretString) -> Result<Receipt> {
        let body = canonical::encode(&payload.to_map())?;
        let signature = signature::sign(secret, &body);

        tracing::debug!(
            endpoint = %self.endpoint,
            body_len = body.len(),
            "submitting signed payload"
        );

        self.exchange(body, &signature).map_err(|err| {
            let masked = signature::masked(&signature);
            tracing::warn!(
                action_run_link = %payload.action_run_link,
                signature = %masked,
                error = %err,
                "submission failed"
            );
            err.with_diagnostics(Diagnostics {
                action_run_link: payload.action_run_link.clone(),
                signature_masked: masked,
            })
        })
    }

    fn exchange(&self, body: Vec<u8>, signature: &str) -> Result<Receipt> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json; charset=utf-8")
            .header("X-Signature-256", signature)
            .body(body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if status != StatusCode::OK {
            return Err(Error::rejected(
                "endpoint rejected the submission",
                status.as_u16(),
                text,
            ));
        }

        let parsed: SubmitResponse = serde_json::from_str(&text).map_err(|err| {
            Error::rejected(
                format!("response body is not valid JSON: {err}"),
                status.as_u16(),
                text.clone(),
            )
        })?;

        // An empty receipt is no better than a missing one; both mean the
        // service did not acknowledge the submission.
        if parsed.receipt.is_empty() {
            return Err(Error::rejected(
                "response is missing a receipt",
                status.as_u16(),
                text,
            ));
        }

        Ok(Receipt(parsed.receipt))
    }
}
