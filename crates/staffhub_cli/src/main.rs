//! Operator CLI for StaffHub client storage.
//!
//! # Responsibility
//! - Provide a smoke check for `staffhub_core` linkage.
//! - Seed the initial super-admin account with a hashed password.
//! - Report guard decisions for the session persisted in a database.

use clap::{Parser, Subcommand};
use staffhub_core::db::open_db;
use staffhub_core::{
    AccountService, AppConfig, AppShell, GuardDecision, SeedOutcome, SqliteAccountRepository,
    SqliteKeyValueStorage,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// StaffHub client core utilities.
#[derive(Parser)]
#[command(name = "staffhub")]
#[command(about = "StaffHub client core utilities", long_about = None)]
struct Cli {
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// JSON app config (log level, fallback paths).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a health-check response.
    Ping,

    /// Print the core crate version.
    Version,

    /// Create the super-admin account unless the email already exists.
    #[command(name = "seed-admin")]
    SeedAdmin {
        /// SQLite database file.
        #[arg(long)]
        db: PathBuf,

        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        /// Hashed with Argon2id before storage.
        #[arg(long, env = "STAFFHUB_ADMIN_PASSWORD")]
        password: String,
    },

    /// Show the guard decision for a route under the persisted session.
    #[command(name = "check-route")]
    CheckRoute {
        /// SQLite database file.
        #[arg(long)]
        db: PathBuf,

        route: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = config.start_logging(log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: AppConfig) -> Result<(), String> {
    match command {
        Commands::Ping => {
            println!("staffhub_core ping={}", staffhub_core::ping());
        }
        Commands::Version => {
            println!("staffhub_core version={}", staffhub_core::core_version());
        }
        Commands::SeedAdmin {
            db,
            email,
            name,
            password,
        } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let service = AccountService::new(SqliteAccountRepository::new(&conn));
            let outcome = service
                .seed_admin(&email, &name, &password)
                .map_err(|err| err.to_string())?;
            match outcome {
                SeedOutcome::Created(identity) => {
                    println!("created super admin id={}", identity.id);
                }
                SeedOutcome::AlreadyExists(identity) => {
                    println!("account already exists id={}", identity.id);
                }
            }
        }
        Commands::CheckRoute { db, route } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let shell = AppShell::boot(config, SqliteKeyValueStorage::new(&conn))
                .map_err(|err| err.to_string())?;
            match shell.navigate(&route) {
                GuardDecision::Allow => println!("allow {route}"),
                GuardDecision::Redirect(target) => println!("redirect {route} -> {target}"),
            }
        }
    }
    Ok(())
}
