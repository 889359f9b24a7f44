// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator configuration.
//!
//! Values come from the environment (a `.env` file is honoured) and are
//! then overridden by command-line flags:
//!
//! | Variable           | Meaning                                  | Default             |
//! |--------------------|------------------------------------------|---------------------|
//! | `BIZREG_DATABASE`  | `SQLite` database path                   | in-memory           |
//! | `BIZREG_LOG_LEVEL` | log filter when `RUST_LOG` is unset      | `info`              |
//! | `BIZREG_FLAGS`     | comma-separated enabled feature flags    | none                |
//! | `BIZREG_TIMEZONE`  | legislation timezone                     | `America/Vancouver` |

use bizreg::StaticFlags;
use bizreg_domain::{DEFAULT_LEGISLATION_TIMEZONE, parse_timezone};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DATABASE_VAR: &str = "BIZREG_DATABASE";
pub const LOG_LEVEL_VAR: &str = "BIZREG_LOG_LEVEL";
pub const FLAGS_VAR: &str = "BIZREG_FLAGS";
pub const TIMEZONE_VAR: &str = "BIZREG_TIMEZONE";

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BIZREG_TIMEZONE is not a known timezone: {0}")]
    InvalidTimezone(String),
    #[error("invalid log filter '{level}': {reason}")]
    InvalidLogLevel { level: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database file. `None` runs against a throwaway in-memory database.
    pub database: Option<PathBuf>,
    pub log_level: String,
    pub flags: StaticFlags,
    /// IANA name of the timezone that decides calendar dates.
    pub timezone: String,
}

impl AppConfig {
    /// Loads configuration from the process environment, reading `.env`
    /// first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimezone` if `BIZREG_TIMEZONE` names an
    /// unknown timezone.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimezone` if the timezone is unknown.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timezone: String =
            read(TIMEZONE_VAR).unwrap_or_else(|| DEFAULT_LEGISLATION_TIMEZONE.to_string());
        parse_timezone(&timezone).map_err(|_| ConfigError::InvalidTimezone(timezone.clone()))?;

        Ok(Self {
            database: read(DATABASE_VAR).map(PathBuf::from),
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            flags: read(FLAGS_VAR).map_or_else(StaticFlags::default, |v| StaticFlags::from_csv(&v)),
            timezone,
        })
    }

    /// Applies command-line overrides. A database path replaces the
    /// configured one; flags are enabled on top of the configured set.
    #[must_use]
    pub fn with_overrides(mut self, database: Option<PathBuf>, flags: &[String]) -> Self {
        if database.is_some() {
            self.database = database;
        }
        for flag in flags {
            self.flags.enable(flag);
        }
        self
    }

    /// The log filter: `RUST_LOG` when set, otherwise the configured level.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLogLevel` if the configured level does
    /// not parse as a filter.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(&self.log_level).map_err(|e| ConfigError::InvalidLogLevel {
                level: self.log_level.clone(),
                reason: e.to_string(),
            })
        })
    }
}
