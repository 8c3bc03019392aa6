use std::fmt;

/// Classification of a failure, used by callers to branch on recovery.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A required context field was missing or empty at startup.
    /// No request was attempted.
    Config,
    /// A defensive contract breach inside the library before anything is
    /// sent (empty payload field, malformed endpoint URL, HTTP client
    /// construction failure).
    Validation,
    /// Anything that went wrong after the request left the building:
    /// transport failure, timeout, non-200 status, malformed or
    /// incomplete response body. One attempt, no retries.
    Submission,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Config => f.write_str("config"),
            Kind::Validation => f.write_str("validation"),
            Kind::Submission => f.write_str("submission"),
        }
    }
}

/// Operator-facing failure context attached to submission errors.
///
/// Carries only what is safe to log: the action-run link for tracing the
/// failure back to the CI run, and a masked signature prefix. The full
/// signature is a proof-of-possession of the secret for that exact body and
/// is deliberately withheld.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostics {
    pub action_run_link: String,
    pub signature_masked: String,
}

/// Crate-wide error type.
#[derive(Debug)]
pub struct Error {
    kind: Kind,
    message: String,
    status: Option<u16>,
    body: Option<String>,
    diagnostics: Option<Diagnostics>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::new(Kind::Config, message)
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(Kind::Validation, message)
    }

    fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            diagnostics: None,
            source: None,
        }
    }

    /// Rejected or unusable response: status code and raw body are kept
    /// verbatim for diagnosis.
    pub(crate) fn rejected(message: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let mut err = Self::new(Kind::Submission, message);
        err.status = Some(status);
        err.body = Some(body.into());
        err
    }

    pub(crate) fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// HTTP status of the rejected response, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Raw response body of the rejected response, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }

    /// Whether the underlying transport error was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (status {status})")?;
        }
        if let Some(body) = &self.body {
            write!(f, ": {body}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_owned()
        } else {
            format!("transport failure: {err}")
        };
        let mut out = Self::new(Kind::Submission, message);
        out.source = Some(Box::new(err));
        out
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::validation(format!("invalid endpoint URL: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("serialization failure: {err}"))
    }
}
