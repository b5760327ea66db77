use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("User context file not found: {}", .0.display())]
    ContextNotFound(PathBuf),

    #[error("Malformed applicant data: {0}")]
    MalformedContext(String),

    #[error("Invalid applicant JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("JavaScript error: {0}")]
    JsError(String),

    #[error("Failed to start agent `{command}`: {source}")]
    AgentSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Agent exited with {status}: {stderr}")]
    AgentFailed { status: ExitStatus, stderr: String },

    #[error("CDP error: {0}")]
    CdpError(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
