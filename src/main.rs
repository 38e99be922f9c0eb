use anyhow::Result;
use clap::Parser;
use hireflow::{
    app,
    cli::{
        handle_assistant_command, handle_attendee_command, handle_webinar_command, Cli, CliCommand,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("HireFlow {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Assistant(args)) => {
            handle_assistant_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Webinar(args)) => {
            handle_webinar_command(args)?;
            return Ok(());
        }
        Some(CliCommand::Attendee(args)) => {
            handle_attendee_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Serve) | None => {}
    }

    app::run_service().await
}
