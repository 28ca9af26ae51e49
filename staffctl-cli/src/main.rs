//! staffctl CLI - manage departments, roles and employees from a menu
//!
//! Connection settings come from `--database-url` / `DATABASE_URL`, or from
//! `DB_USER`, `DB_HOST`, `DB_NAME`, `DB_PASSWORD` and `DB_PORT`. A `.env` in
//! the current directory or `~/.staffctl/.env` is loaded first.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use staffctl_cli::config::load_dotenv;
use staffctl_cli::tracing_setup::{self, TracingConfig};
use staffctl_cli::{menu, TerminalPrompter};
use staffctl_core::{ConnectTarget, Store};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "staffctl",
    author,
    version,
    about = "Interactive manager for departments, roles and employees",
    long_about = "Presents a menu to view and add departments, roles and employees, \
                  and to reassign an employee's role, against a PostgreSQL (or SQLite) database."
)]
struct Cli {
    /// Database URL (overrides DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env has to be loaded before clap reads env-backed arguments
    let env_files = load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    for path in &env_files {
        debug!("Loaded .env from {}", path.display());
    }

    let target = ConnectTarget::from_env(cli.database_url.as_deref())?;
    info!(database = %target.redacted(), "connecting");

    let mut store = Store::connect(&target)
        .await
        .context("Failed to connect to the database")?;
    println!("Connected to the database");

    let mut prompter = TerminalPrompter;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let outcome = menu::run(&mut store, &mut prompter, &mut stdout, &mut stderr).await;

    if let Err(err) = store.close().await {
        warn!("Failed to close database connection: {err}");
    }

    outcome
}
