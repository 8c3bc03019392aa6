//! Submission context assembly from the process environment.
//!
//! All environment reads happen here, once, at startup. The signing and
//! transport code only ever sees the resolved, immutable context.

use secrecy::SecretString;

use crate::Result;
use crate::error::Error;

/// Fully resolved identity and CI-run values for one submission.
///
/// Every field is non-empty by construction; the secret is wrapped so it
/// never appears in `Debug` output or logs.
#[derive(Clone, Debug)]
pub struct SubmissionContext {
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
    pub action_run_link: String,
    pub signing_secret: SecretString,
}

impl SubmissionContext {
    /// Resolves the context from process environment variables.
    ///
    /// Required: `NAME`, `EMAIL`, `RESUME_LINK`, `SIGNING_SECRET`,
    /// `GITHUB_RUN_ID`, and either `REPOSITORY_LINK` or the
    /// `GITHUB_SERVER_URL` + `GITHUB_REPOSITORY` pair it is derived from.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the context from an arbitrary lookup function.
    ///
    /// This is the seam tests use instead of mutating the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let run_id = lookup("GITHUB_RUN_ID")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::config("missing GITHUB_RUN_ID; are you running in GitHub Actions?")
            })?;

        let repository_link = Self::resolve_repository_link(&lookup)?;
        let action_run_link = format!("{repository_link}/actions/runs/{run_id}");

        Ok(Self {
            name: require(&lookup, "NAME")?,
            email: require(&lookup, "EMAIL")?,
            resume_link: require(&lookup, "RESUME_LINK")?,
            repository_link,
            action_run_link,
            signing_secret: SecretString::from(require(&lookup, "SIGNING_SECRET")?),
        })
    }

    /// Flat `REPOSITORY_LINK` wins; otherwise the link is composed from the
    /// standard GitHub Actions server/repository pair.
    fn resolve_repository_link(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(link) = lookup("REPOSITORY_LINK").filter(|v| !v.is_empty()) {
            return Ok(link);
        }

        let server = require(&lookup, "GITHUB_SERVER_URL")?;
        let repository = require(&lookup, "GITHUB_REPOSITORY")?;
        Ok(format!(
            "{}/{repository}",
            server.trim_end_matches('/')
        ))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        name: &str,
        email: &str,
        resume_link: &str,
        repository_link: &str,
        run_id: &str,
        signing_secret: &str,
    ) -> Self {
        Self {
            name: name.to_owned(),
            email: email.to_owned(),
            resume_link: resume_link.to_owned(),
            repository_link: repository_link.to_owned(),
            action_run_link: format!("{repository_link}/actions/runs/{run_id}"),
            signing_secret: SecretString::from(signing_secret),
        }
    }
}

fn require(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::config(format!("missing required environment variable `{key}`")))
}
