//! schoology-mcp CLI entry point.

use anyhow::Result;
use clap::Parser;
use schoology_mcp::cli::{commands, Cli, Commands};
use schoology_mcp::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging; stdout belongs to the JSON-RPC stream
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("schoology_mcp={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command.unwrap_or(Commands::Mcp) {
        Commands::Mcp => {
            commands::run_mcp(&settings).await?;
        }

        Commands::Courses { json } => {
            commands::run_courses(json, &settings).await?;
        }

        Commands::Assignments { json } => {
            commands::run_assignments(json, &settings).await?;
        }

        Commands::Date => {
            commands::run_date();
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &settings)?;
        }
    }

    Ok(())
}
