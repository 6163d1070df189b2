mod cli;
mod config;
mod credits;
mod db;
mod journey;
mod models;
mod streak;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        // Setup wizard
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // Explicit subcommands — check setup first
        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            match cmd {
                Commands::Mark { prayer, status } => {
                    handlers::handle_mark(&conn, &prayer, &status)?;
                }
                Commands::Menstrual { off } => {
                    handlers::handle_menstrual(&conn, off)?;
                }
                Commands::Fast { answer } => {
                    handlers::handle_fast(&conn, &config, &answer)?;
                }
                Commands::Streak => {
                    handlers::handle_streak(&conn)?;
                }
                Commands::Journey { weeks, month } => {
                    handlers::handle_journey(&conn, &config, weeks, month)?;
                }
                Commands::Stats => {
                    handlers::handle_stats(&conn, &config)?;
                }
                Commands::Hijri { date } => {
                    handlers::handle_hijri(&config, date.as_deref())?;
                }
                Commands::Export { json } => {
                    handlers::handle_export(&conn, &config, json)?;
                }
                Commands::Setup { .. } => unreachable!(),
            }
        }

        // No subcommand → today's overview
        None => {
            ensure_setup(&conn, &mut config)?;
            handlers::handle_stats(&conn, &config)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
