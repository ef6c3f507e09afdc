/*
[INPUT]:  CLI arguments, YAML configuration file, TRACKIT_* env vars, OS shutdown signals
[OUTPUT]: Account commands, task mutations, and a live-refreshing board
[POS]:    Binary entry point
[UPDATE]: When changing CLI commands, startup flow, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use trackit_board::{BoardConfig, Filter};
use trackit_client::TaskStatus;

#[derive(Parser, Debug)]
#[command(name = "trackit", version, about = "TrackIt task board client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a configuration file
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Create an account and sign in
    Register,
    /// Sign in and persist the session
    Login,
    /// Sign out and delete the local session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Fetch once and print tasks with statistics
    List {
        #[arg(long, default_value_t = Filter::All)]
        filter: Filter,
        /// Print tasks and statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Live board, refreshed on every poll until interrupted
    Board {
        #[arg(long, default_value_t = Filter::All)]
        filter: Filter,
    },
    /// Create a task
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        #[arg(long, short, default_value_t = TaskStatus::Todo)]
        status: TaskStatus,
    },
    /// Change a task's title or description
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Move a task to another column; prompts for the column when omitted
    Move { id: String, status: Option<String> },
    /// Delete a task
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;
    debug!(command = ?args.command, "starting trackit");

    let command = match args.command {
        Command::Init { output } => {
            let output = output
                .or(args.config_path)
                .or_else(BoardConfig::default_path)
                .context("no config directory available; pass --output")?;
            cli::init::run_init(output)?;
            return Ok(ExitCode::SUCCESS);
        }
        command => command,
    };

    let config = BoardConfig::load(args.config_path.as_deref()).context("load config")?;
    info!(
        base_url = %config.api.base_url,
        poll_interval_secs = config.sync.poll_interval_secs,
        "configuration loaded"
    );
    let auth = cli::build_auth(&config)?;

    match command {
        Command::Init { .. } => Ok(ExitCode::SUCCESS),
        Command::Register => cli::account::register(&auth).await,
        Command::Login => cli::account::login(&auth).await,
        Command::Logout => cli::account::logout(&auth).await,
        Command::Whoami => cli::account::whoami(&auth).await,
        Command::List { filter, json } => cli::tasks::list(&auth, filter, json).await,
        Command::Board { filter } => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            cli::tasks::board(&auth, &config, filter, shutdown).await
        }
        Command::Add {
            title,
            description,
            status,
        } => cli::tasks::add(&auth, title, description, status).await,
        Command::Edit {
            id,
            title,
            description,
        } => cli::tasks::edit(&auth, &id, title, description).await,
        Command::Move { id, status } => cli::tasks::move_task(&auth, &id, status).await,
        Command::Rm { id } => cli::tasks::remove(&auth, &id).await,
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
