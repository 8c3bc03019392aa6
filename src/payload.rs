//! The submission payload: a closed set of six string fields.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};

use crate::Result;
use crate::config::SubmissionContext;
use crate::error::Error;

/// The exact key set the receiving contract accepts; nothing more, nothing
/// less, all values non-empty strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payload {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
    pub action_run_link: String,
}

impl Payload {
    /// Builds a payload from resolved context values, stamped with the
    /// current UTC time.
    pub fn new(context: &SubmissionContext) -> Result<Self> {
        Self::with_timestamp(context, iso_utc_now())
    }

    /// Builds a payload with an explicit timestamp.
    ///
    /// The caller-supplied timestamp makes canonical bytes reproducible,
    /// which signing tests depend on.
    pub fn with_timestamp(
        context: &SubmissionContext,
        timestamp: impl Into<String>,
    ) -> Result<Self> {
        let payload = Self {
            timestamp: timestamp.into(),
            name: context.name.clone(),
            email: context.email.clone(),
            resume_link: context.resume_link.clone(),
            repository_link: context.repository_link.clone(),
            action_run_link: context.action_run_link.clone(),
        };
        payload.ensure_complete()?;
        Ok(payload)
    }

    /// The map view fed to the canonical encoder.
    ///
    /// Going through a `BTreeMap` makes member ordering a property of the
    /// encoding, not of field declaration order.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("timestamp", self.timestamp.as_str()),
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("resume_link", self.resume_link.as_str()),
            ("repository_link", self.repository_link.as_str()),
            ("action_run_link", self.action_run_link.as_str()),
        ])
    }

    fn ensure_complete(&self) -> Result<()> {
        for (key, value) in self.to_map() {
            if value.is_empty() {
                return Err(Error::validation(format!(
                    "payload field `{key}` must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

/// Current UTC time as ISO 8601 with millisecond precision and a literal
/// `Z` suffix, e.g. `2026-01-06T16:59:37.571Z`.
#[must_use]
pub fn iso_utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
