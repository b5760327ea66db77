//! Loading the applicant's context from disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::applicant::{self, ApplicantFields, ApplicantRecord, PLACEHOLDER_PASSWORD};
use crate::error::{Error, Result};

pub const DEFAULT_CONTEXT_PATH: &str = "user_context.txt";
pub const PASSWORD_VAR: &str = "COMMONAPP_PASSWORD";
pub const EMAIL_VAR: &str = "COMMONAPP_EMAIL";

/// Where the applicant data comes from. Exactly one source is used per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    /// Free-form notes, passed to the agent verbatim.
    FreeText(PathBuf),
    /// A JSON document with the applicant's fields.
    Structured(PathBuf),
}

impl ContextSource {
    /// `data` wins over `context`; with neither, falls back to
    /// [`DEFAULT_CONTEXT_PATH`].
    pub fn select(context: Option<PathBuf>, data: Option<PathBuf>) -> Self {
        match (context, data) {
            (_, Some(data)) => ContextSource::Structured(data),
            (Some(context), None) => ContextSource::FreeText(context),
            (None, None) => ContextSource::FreeText(PathBuf::from(DEFAULT_CONTEXT_PATH)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ContextSource::FreeText(p) | ContextSource::Structured(p) => p,
        }
    }
}

/// Supplies secrets by name.
pub trait SecretProvider {
    fn secret(&self, name: &str) -> Option<String>;
}

/// Reads secrets from the process environment. Empty values count as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed secrets, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct StaticSecrets {
    entries: Vec<(String, String)>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), value.into()));
        self
    }
}

impl SecretProvider for StaticSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

/// Load and normalize the applicant record from `source`.
pub async fn load(source: &ContextSource, secrets: &dyn SecretProvider) -> Result<ApplicantRecord> {
    let path = source.path();
    if !tokio::fs::try_exists(path).await? {
        return Err(Error::ContextNotFound(path.to_path_buf()));
    }
    let content = tokio::fs::read_to_string(path).await?;

    match source {
        ContextSource::FreeText(_) => {
            info!(path = %path.display(), "loading free-text applicant context");
            Ok(from_free_text(content, secrets))
        }
        ContextSource::Structured(_) => {
            info!(path = %path.display(), "loading structured applicant data");
            from_json(&content, secrets)
        }
    }
}

/// Free-text mode: the placeholder profile plus the file echoed as context.
pub fn from_free_text(content: String, secrets: &dyn SecretProvider) -> ApplicantRecord {
    let mut fields = ApplicantFields::placeholder_profile();
    if let Some(email) = secrets.secret(EMAIL_VAR) {
        fields.email = Some(email);
    }
    let password = secrets
        .secret(PASSWORD_VAR)
        .unwrap_or_else(|| PLACEHOLDER_PASSWORD.to_string());
    applicant::normalize(fields, Some(password), content)
}

/// Structured mode: recognized keys mapped onto the record, the whole document
/// re-serialized as context. The password never comes from the document.
pub fn from_json(content: &str, secrets: &dyn SecretProvider) -> Result<ApplicantRecord> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(Error::MalformedContext(
            "top-level JSON value must be an object".into(),
        ));
    }
    let fields: ApplicantFields = serde_json::from_value(value.clone())?;
    let full_context = serde_json::to_string_pretty(&value)?;

    let password = secrets.secret(PASSWORD_VAR);
    if password.is_none() {
        warn!("{PASSWORD_VAR} is not set, logging in with an empty password");
    }
    debug!(keys = value.as_object().map_or(0, |o| o.len()), "parsed applicant JSON");

    Ok(applicant::normalize(fields, password, full_context))
}
