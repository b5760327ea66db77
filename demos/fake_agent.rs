//! Run the full load → assemble → agent flow against an in-process agent.
//!
//! ```bash
//! cargo run --example fake_agent
//! ```

use async_trait::async_trait;
use commonapp_autofill::context::{self, ContextSource, PASSWORD_VAR};
use commonapp_autofill::{runner, Agent, AgentConfig, Report, Result, StaticSecrets, TaskRequest};

/// Answers every task with a summary of what it was asked to do.
struct EchoAgent;

#[async_trait]
impl Agent for EchoAgent {
    async fn run_task(&self, request: &TaskRequest) -> Result<Report> {
        let stages = request
            .instructions
            .lines()
            .filter(|l| l.starts_with("**STAGE"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Report::new(format!(
            "Model: {}\nLogin: {}\nTools: {}\n{stages}",
            request.config.model,
            request.credentials.email,
            request.config.tools.names().join(", "),
        )))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let source = ContextSource::Structured(
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/applicant.json").into(),
    );
    let secrets = StaticSecrets::new().with(PASSWORD_VAR, "demo-password");
    let record = context::load(&source, &secrets).await?;

    println!("{}", runner::start_banner(&record, None));
    let report = runner::run(&EchoAgent, &record, AgentConfig::default()).await?;
    println!("{}", runner::result_banner(&report));
    Ok(())
}
