mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("MINERVA_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "minerva", &mut std::io::stdout());
        return Ok(());
    }

    let file_path = cli
        .file
        .or_else(|| {
            minerva_core::AppConfig::load()
                .data_file
                .map(|p| p.to_string_lossy().into_owned())
        })
        .ok_or_else(|| {
            anyhow::anyhow!("a data file is required (--file, MINERVA_FILE, or config.toml)")
        })?;

    let ctx = CliContext::load(&file_path, cli.actor).await?;

    match cli.command {
        Commands::Flow(flow_cmd) => {
            handlers::flow::handle(&ctx, flow_cmd.action).await?;
        }
        Commands::Task(task_cmd) => {
            handlers::task::handle(&ctx, task_cmd.action).await?;
        }
        Commands::Team(team_cmd) => {
            handlers::team::handle(&ctx, team_cmd.action).await?;
        }
        Commands::Profile(profile_cmd) => {
            handlers::profile::handle(&ctx, profile_cmd.action).await?;
        }
        Commands::Permission(permission_cmd) => {
            handlers::permission::handle(&ctx, permission_cmd.action).await?;
        }
        Commands::Export(args) => {
            handlers::export::handle_export(&ctx, args).await?;
        }
        Commands::Import(args) => {
            handlers::export::handle_import(&ctx, args).await?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
