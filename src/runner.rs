//! Assemble the task for one applicant, hand it to the agent, and format the
//! console banners around the run.

use std::path::Path;

use tracing::info;

use crate::agent::{Agent, Report, TaskRequest};
use crate::applicant::ApplicantRecord;
use crate::config::AgentConfig;
use crate::error::Result;
use crate::prompt;

const RULE_WIDTH: usize = 60;

/// Build the request the agent receives for `record`.
pub fn task_request(record: &ApplicantRecord, config: AgentConfig) -> TaskRequest {
    TaskRequest {
        instructions: prompt::build_task(record),
        credentials: record.credentials.clone(),
        config,
    }
}

/// Run the agent once for `record` and return its report unchanged.
pub async fn run(agent: &dyn Agent, record: &ApplicantRecord, config: AgentConfig) -> Result<Report> {
    let request = task_request(record, config);
    info!(
        model = %request.config.model,
        colleges = record.colleges.len(),
        task_len = request.instructions.len(),
        "handing task to agent"
    );
    agent.run_task(&request).await
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn start_banner(record: &ApplicantRecord, resume: Option<&Path>) -> String {
    let mut lines = vec![
        String::new(),
        rule(),
        "Starting CommonApp Automation".to_string(),
        rule(),
        format!("User: {}", record.full_name()),
        format!("Email: {}", record.email()),
        format!("Colleges to apply: {}", record.colleges.join(", ")),
        format!("Application Term: {}", record.application_term),
    ];
    if let Some(resume) = resume {
        lines.push(format!("Resume: {}", resume.display()));
    }
    lines.push(rule());
    lines.push(String::new());
    lines.join("\n")
}

pub fn result_banner(report: &Report) -> String {
    [
        String::new(),
        rule(),
        "Automation Result".to_string(),
        rule(),
        report.to_string(),
        rule(),
        String::new(),
    ]
    .join("\n")
}
