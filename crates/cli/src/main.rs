//! promptsync CLI
//!
//! Main entry point for the promptsync command-line tool.
//! Pulls prompts from the LangSmith Prompt Hub, checks them locally and pushes
//! optimized versions back.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, PullCommand, PushCommand};
use promptsync_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// promptsync - keep LangSmith hub prompts and local YAML in sync
#[derive(Parser, Debug)]
#[command(name = "promptsync")]
#[command(about = "Pull, check and push LangSmith hub prompts", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PROMPTSYNC_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any non-falsey `NO_COLOR` value also works)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pull the baseline prompt from the hub
    Pull(PullCommand),

    /// Validate and push the optimized prompt
    Push(PushCommand),

    /// Run the content rubric on local prompts
    Check(CheckCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match init(&cli) {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e),
    };

    ExitCode::from(exit_status(&result))
}

/// Load configuration, apply CLI overrides and start logging.
fn init(cli: &Cli) -> AppResult<AppConfig> {
    let config = AppConfig::load(cli.workspace.clone(), cli.config.clone())?.with_overrides(
        cli.log_level.clone(),
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("promptsync starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Hub endpoint: {}", config.endpoint);

    Ok(config)
}

async fn run(command: Commands, config: &AppConfig) -> AppResult<()> {
    let command_name = match &command {
        Commands::Pull(_) => "pull",
        Commands::Push(_) => "push",
        Commands::Check(_) => "check",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match command {
        Commands::Pull(cmd) => cmd.execute(config).await,
        Commands::Push(cmd) => cmd.execute(config).await,
        Commands::Check(cmd) => cmd.execute(config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

/// Process exit status for a command result; failures are printed to stderr.
fn exit_status(result: &AppResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("\n❌ {}", e);
            1
        }
    }
}
