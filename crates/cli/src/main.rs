// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use bizreg_persistence::Persistence;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::{error, info};

use commands::Report;
use config::AppConfig;
use error::CliError;

/// Business registry operator tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Overrides `BIZREG_DATABASE`.
    /// If neither is set, uses an in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Feature flag to enable on top of `BIZREG_FLAGS`. May be repeated.
    #[arg(long = "flag", value_name = "NAME")]
    flags: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or migrate the database
    Init,
    /// Validate a filing document and print any errors
    Validate {
        /// Path to the filing JSON
        #[arg(long)]
        filing: PathBuf,
        /// Business to validate against, when not the one named in the filing
        #[arg(long)]
        identifier: Option<String>,
    },
    /// Print a business with its standing
    Business {
        #[arg(long)]
        identifier: String,
    },
    /// Print a business as it stood when a filing was applied
    History {
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        filing_id: i64,
    },
    /// Print the fee code for a filing
    FeeCode {
        #[arg(long)]
        filing_type: String,
        #[arg(long)]
        sub_type: Option<String>,
        #[arg(long)]
        legal_type: String,
    },
}

fn run(command: Command, config: &AppConfig) -> Result<Report, CliError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();

    match command {
        Command::FeeCode {
            filing_type,
            sub_type,
            legal_type,
        } => commands::fee_code(&filing_type, sub_type.as_deref(), &legal_type),
        Command::Init => {
            let mut persistence: Persistence = commands::open_persistence(config)?;
            commands::init(&mut persistence, config)
        }
        Command::Validate { filing, identifier } => {
            let document: Value = commands::read_filing(&filing)?;
            let mut persistence: Persistence = commands::open_persistence(config)?;
            commands::validate(
                &mut persistence,
                config,
                &document,
                identifier.as_deref(),
                now,
            )
        }
        Command::Business { identifier } => {
            let mut persistence: Persistence = commands::open_persistence(config)?;
            commands::business(&mut persistence, config, &identifier, now)
        }
        Command::History {
            identifier,
            filing_id,
        } => {
            let mut persistence: Persistence = commands::open_persistence(config)?;
            commands::history(&mut persistence, config, &identifier, filing_id, now)
        }
    }
}

fn main() -> ExitCode {
    let args: Args = Args::parse();

    let config: AppConfig = match AppConfig::load() {
        Ok(config) => config.with_overrides(args.database, &args.flags),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match config.log_filter() {
        Ok(filter) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    info!(timezone = %config.timezone, "Starting bizreg");

    let report: Report = match run(args.command, &config) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report.body) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => {
            eprintln!("{}", CliError::from(err));
            return ExitCode::FAILURE;
        }
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
