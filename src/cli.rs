use std::path::PathBuf;

use clap::Parser;

use crate::agent::DEFAULT_AGENT_COMMAND;
use crate::config::{AgentConfig, SessionBuilder, ToolSet, DEFAULT_MODEL};
use crate::context::ContextSource;

#[derive(Parser, Debug)]
#[command(
    name = "commonapp-autofill",
    version,
    about = "Automated CommonApp form filler using user context",
    after_help = "Examples:\n  \
        # Use default user_context.txt\n  \
        commonapp-autofill\n\n  \
        # Use custom context file\n  \
        commonapp-autofill --context my_context.txt\n\n  \
        # Use structured applicant data (password from COMMONAPP_PASSWORD)\n  \
        commonapp-autofill --data applicant.json --resume resume.pdf"
)]
pub struct Cli {
    #[arg(long, help = "Path to user context file (default: user_context.txt)")]
    pub context: Option<PathBuf>,
    #[arg(long, help = "Path to structured applicant JSON; takes precedence over --context")]
    pub data: Option<PathBuf>,
    #[arg(long, help = "Path to the applicant's resume")]
    pub resume: Option<PathBuf>,
    #[arg(long, env = "AUTOFILL_MODEL", default_value = DEFAULT_MODEL, help = "Model the agent should use")]
    pub model: String,
    #[arg(
        long,
        env = "AUTOFILL_AGENT_COMMAND",
        default_value = DEFAULT_AGENT_COMMAND,
        help = "Agent executable to run"
    )]
    pub agent_command: String,
    #[arg(
        long = "agent-arg",
        allow_hyphen_values = true,
        help = "Extra argument for the agent executable (repeatable)"
    )]
    pub agent_args: Vec<String>,
    #[arg(long, default_value_t = false, help = "Let the agent launch its own browser")]
    pub no_browser: bool,
    #[arg(long, default_value_t = false, help = "Show the browser window")]
    pub headful: bool,
    #[arg(long, help = "Chrome executable to launch")]
    pub chrome_path: Option<String>,
    #[arg(long, default_value = "info", help = "Log level when RUST_LOG is unset")]
    pub log_level: String,
}

impl Cli {
    pub fn source(&self) -> ContextSource {
        ContextSource::select(self.context.clone(), self.data.clone())
    }

    pub fn agent_config(&self) -> AgentConfig {
        let mut browser = SessionBuilder::new()
            .headless(!self.headful)
            .cross_origin_iframes(true);
        if let Some(ref path) = self.chrome_path {
            browser = browser.chrome_path(path);
        }
        AgentConfig {
            model: self.model.clone(),
            browser: browser.build_config(),
            tools: ToolSet::default(),
        }
    }
}
