//! anchor-browse - browse the Anchor musician catalog and job board from a terminal
//!
//! Settings resolve CLI → environment → TOML file → compiled default. Logs go
//! to stderr so they never mix with shell output on stdout.

use anchor_browse::Shell;
use anchor_common::config::{BrowseConfig, ConfigOverrides, ConfigResolver};
use anchor_common::jobs::{builtin_jobs, load_jobs, JobBoard, UserRole};
use anchor_common::Catalog;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for anchor-browse
#[derive(Parser, Debug)]
#[command(name = "anchor-browse")]
#[command(about = "Browse musicians and gigs on the Anchor marketplace")]
#[command(version)]
struct Args {
    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Musician seed file (JSON array) replacing the built-in catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Job seed file (JSON array) replacing the built-in jobs
    #[arg(long)]
    jobs: Option<PathBuf>,

    /// Maximum entries per browse section
    #[arg(long)]
    section_limit: Option<usize>,

    /// Signed-in role: client, musician or admin
    #[arg(long)]
    role: Option<UserRole>,

    /// Signed-in user id
    #[arg(long)]
    user_id: Option<String>,

    /// Name shown as the client on jobs you post
    #[arg(long)]
    user_name: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            config_path: args.config,
            catalog_path: args.catalog,
            jobs_path: args.jobs,
            section_limit: args.section_limit,
            log_level: args.log_level,
            role: args.role,
            user_id: args.user_id,
            user_name: args.user_name,
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("anchor_browse={level},anchor_common={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(config: &BrowseConfig) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn load_board(config: &BrowseConfig) -> Result<JobBoard> {
    let jobs = match &config.jobs_path {
        Some(path) => load_jobs(path)
            .with_context(|| format!("Failed to load jobs from {}", path.display()))?,
        None => builtin_jobs().context("Built-in jobs are invalid")?,
    };
    let board = JobBoard::new(jobs, config.role, config.user_id.clone());
    Ok(match &config.user_name {
        Some(name) => board.with_user_name(name.clone()),
        None => board,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let resolver = ConfigResolver::new(args.into());
    let config = resolver
        .resolve()
        .context("Failed to resolve configuration")?;

    init_tracing(&config.log_level);

    info!(
        "Starting Anchor browse (anchor-browse) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = resolver.config_path() {
        info!("Config file: {}", path.display());
    }

    let catalog = load_catalog(&config)?;
    let board = load_board(&config)?;
    info!(
        musicians = catalog.len(),
        jobs = board.jobs().len(),
        role = %config.role,
        user_id = %config.user_id,
        section_limit = config.section_limit,
        "Catalog ready"
    );

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut shell = Shell::new(&catalog, board, config.section_limit).with_prompt(interactive);
    shell
        .run(stdin.lock(), std::io::stdout().lock())
        .context("Shell I/O failed")?;

    info!("Session ended");
    Ok(())
}
