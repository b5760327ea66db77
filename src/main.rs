use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commonapp_autofill::cli::Cli;
use commonapp_autofill::{context, runner, EnvSecrets, ProcessAgent};

fn init_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level.parse().context("Invalid log level")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let source = cli.source();
    let record = context::load(&source, &EnvSecrets)
        .await
        .with_context(|| format!("failed to load applicant context from {}", source.path().display()))?;

    if let Some(ref resume) = cli.resume {
        info!(path = %resume.display(), "resume provided");
    }
    println!("{}", runner::start_banner(&record, cli.resume.as_deref()));

    let agent = ProcessAgent::new(cli.agent_command.clone())
        .args(cli.agent_args.iter().cloned())
        .launch_browser(!cli.no_browser);

    let report = runner::run(&agent, &record, cli.agent_config())
        .await
        .with_context(|| format!("agent `{}` did not complete", agent.command()))?;

    println!("{}", runner::result_banner(&report));
    Ok(())
}
