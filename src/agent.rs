//! The boundary to the external browser agent.
//!
//! The agent owns everything that happens inside the browser. This crate hands it a
//! task and waits for its final report; [`ProcessAgent`] does that by running an
//! agent executable against a locally launched browser session.

use std::collections::BTreeMap;
use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::applicant::Credentials;
use crate::browser::BrowserSession;
use crate::config::{AgentConfig, BrowserSessionConfig, ToolSet};
use crate::error::{Error, Result};
use crate::prompt::LOGIN_URL;

pub const DEFAULT_AGENT_COMMAND: &str = "browser-use-agent";

/// One unit of work for the agent.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub instructions: String,
    pub credentials: Credentials,
    pub config: AgentConfig,
}

/// The agent's final textual report, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait Agent: Send + Sync {
    /// Run the task to completion and return the final report.
    async fn run_task(&self, request: &TaskRequest) -> Result<Report>;
}

/// Request written to the agent executable's stdin as a single JSON document.
#[derive(Debug, Serialize)]
pub struct AgentPayload<'a> {
    pub task: &'a str,
    pub model: &'a str,
    /// DevTools URL of the browser to drive; absent when the agent launches its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdp_url: Option<&'a str>,
    pub browser: &'a BrowserSessionConfig,
    pub tools: &'a ToolSet,
    /// Values the agent must mask in its own logs and history.
    pub sensitive_data: BTreeMap<&'static str, &'a str>,
}

impl<'a> AgentPayload<'a> {
    pub fn new(request: &'a TaskRequest, cdp_url: Option<&'a str>) -> Self {
        let mut sensitive_data = BTreeMap::new();
        sensitive_data.insert("email", request.credentials.email.as_str());
        sensitive_data.insert("password", request.credentials.password.as_str());
        Self {
            task: &request.instructions,
            model: &request.config.model,
            cdp_url,
            browser: &request.config.browser,
            tools: &request.config.tools,
            sensitive_data,
        }
    }
}

/// Runs an external agent executable. The executable reads one [`AgentPayload`] from
/// stdin and prints its final report to stdout.
#[derive(Debug, Clone)]
pub struct ProcessAgent {
    command: String,
    args: Vec<String>,
    launch_browser: bool,
}

impl ProcessAgent {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            launch_browser: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether to launch a local browser and pass its CDP URL to the agent.
    pub fn launch_browser(mut self, launch: bool) -> Self {
        self.launch_browser = launch;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    async fn run_process(&self, payload: &AgentPayload<'_>) -> Result<Report> {
        let body = serde_json::to_vec(payload)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::AgentSpawn {
                command: self.command.clone(),
                source,
            })?;
        info!(command = %self.command, "agent started");

        // Write the request while the output pipes drain, so a chatty agent cannot
        // block on a full stderr pipe before it has read its input.
        let stdin = child.stdin.take();
        let write_request = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            let written = async {
                stdin.write_all(&body).await?;
                stdin.shutdown().await
            }
            .await;
            match written {
                // The agent may exit without reading its input; its status says why.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    debug!("agent closed stdin before the request was written");
                    Ok(())
                }
                other => other,
            }
        };

        let (written, output) = tokio::join!(write_request, child.wait_with_output());
        let output = output?;
        written?;

        if !output.status.success() {
            return Err(Error::AgentFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(status = %output.status, "agent finished");
        Ok(Report::new(trim_line_endings(&String::from_utf8_lossy(
            &output.stdout,
        ))))
    }
}

/// Drop only the trailing newlines a process prints after its report.
fn trim_line_endings(stdout: &str) -> String {
    stdout.trim_end_matches(&['\r', '\n'][..]).to_string()
}

impl Default for ProcessAgent {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_COMMAND)
    }
}

#[async_trait]
impl Agent for ProcessAgent {
    async fn run_task(&self, request: &TaskRequest) -> Result<Report> {
        if !self.launch_browser {
            return self.run_process(&AgentPayload::new(request, None)).await;
        }

        let session = BrowserSession::launch(request.config.browser.clone()).await?;
        session.open_start_page(LOGIN_URL).await?;

        let result = self
            .run_process(&AgentPayload::new(request, Some(session.cdp_url())))
            .await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close browser session");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TaskRequest {
        TaskRequest {
            instructions: "fill the forms".into(),
            credentials: Credentials {
                email: "a@b.com".into(),
                password: "pw1".into(),
            },
            config: AgentConfig::default(),
        }
    }

    #[test]
    fn payload_shape() {
        let req = request();
        let value = serde_json::to_value(AgentPayload::new(&req, Some("ws://127.0.0.1:9222/x"))).unwrap();
        assert_eq!(value["task"], "fill the forms");
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["cdp_url"], "ws://127.0.0.1:9222/x");
        assert_eq!(value["browser"]["cross_origin_iframes"], true);
        assert_eq!(value["sensitive_data"]["password"], "pw1");
        assert!(value["tools"].as_array().unwrap().iter().any(|t| t == "done"));
    }

    #[test]
    fn payload_omits_missing_cdp_url() {
        let req = request();
        let value = serde_json::to_value(AgentPayload::new(&req, None)).unwrap();
        assert!(value.get("cdp_url").is_none());
    }

    #[test]
    fn only_trailing_newlines_are_trimmed() {
        assert_eq!(trim_line_endings("  Added: MIT\n\n"), "  Added: MIT");
        assert_eq!(trim_line_endings("Added: MIT\r\n"), "Added: MIT");
        assert_eq!(trim_line_endings("Skipped: essay  "), "Skipped: essay  ");
    }

    #[test]
    fn report_is_verbatim() {
        let report = Report::new("  Added: MIT\n");
        assert_eq!(report.to_string(), "  Added: MIT\n");
        assert_eq!(report.into_string(), "  Added: MIT\n");
    }
}
