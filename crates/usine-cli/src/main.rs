mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("USINE_DEBUG_LOG") {
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
        // Job failures already reach the JSON output; keep stderr to the envelope.
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::ERROR)
            .init();
    }

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        output::output_error(&format!("{:#}", err));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "usine", &mut std::io::stdout());
        return Ok(());
    }

    let file_path = cli
        .file
        .ok_or_else(|| anyhow::anyhow!("--file is required (or set USINE_FILE)"))?;
    let ctx = CliContext::load(&file_path, cli.config.as_deref()).await?;

    match cli.command {
        Commands::Export(args) => handlers::export::handle_export(&ctx, args).await?,
        Commands::ExportAll(args) => handlers::export::handle_export_all(&ctx, args).await?,
        Commands::Summary => handlers::summary::handle_summary(&ctx)?,
        Commands::Completions { .. } => {}
    }
    Ok(())
}
