pub mod agent;
pub mod applicant;
pub mod browser;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod prompt;
pub mod runner;
pub mod stealth;

pub use agent::{Agent, ProcessAgent, Report, TaskRequest};
pub use applicant::{ApplicantRecord, Citizenship, Credentials};
pub use browser::BrowserSession;
pub use config::{AgentConfig, BrowserSessionConfig, SessionBuilder, ToolSet};
pub use context::{ContextSource, EnvSecrets, SecretProvider, StaticSecrets};
pub use error::{Error, Result};
