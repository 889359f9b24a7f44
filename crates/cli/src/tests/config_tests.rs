// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bizreg::{FeatureFlags, NEW_VERSIONING_FLAG, StaticFlags};
use std::path::PathBuf;

use super::helpers::config_from;
use crate::config::{AppConfig, ConfigError};

#[test]
fn test_defaults_when_environment_is_empty() {
    let config: AppConfig = config_from(&[]);

    assert_eq!(config.database, None);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.timezone, "America/Vancouver");
    assert_eq!(config.flags, StaticFlags::default());
}

#[test]
fn test_reads_every_variable() {
    let config: AppConfig = config_from(&[
        ("BIZREG_DATABASE", "/var/lib/bizreg/registry.db"),
        ("BIZREG_LOG_LEVEL", "debug"),
        ("BIZREG_FLAGS", "enable-new-versioning, other-flag"),
        ("BIZREG_TIMEZONE", "America/Toronto"),
    ]);

    assert_eq!(
        config.database,
        Some(PathBuf::from("/var/lib/bizreg/registry.db"))
    );
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.timezone, "America/Toronto");
    assert!(config.flags.is_enabled(NEW_VERSIONING_FLAG));
    assert!(config.flags.is_enabled("other-flag"));
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config: AppConfig = config_from(&[("BIZREG_DATABASE", "  "), ("BIZREG_TIMEZONE", "")]);

    assert_eq!(config.database, None);
    assert_eq!(config.timezone, "America/Vancouver");
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let result: Result<AppConfig, ConfigError> = AppConfig::from_lookup(|key| {
        (key == "BIZREG_TIMEZONE").then(|| String::from("Pacific/Nowhere"))
    });

    assert_eq!(
        result,
        Err(ConfigError::InvalidTimezone(String::from("Pacific/Nowhere")))
    );
}

#[test]
fn test_command_line_overrides_environment() {
    let config: AppConfig = config_from(&[
        ("BIZREG_DATABASE", "env.db"),
        ("BIZREG_FLAGS", "other-flag"),
    ])
    .with_overrides(
        Some(PathBuf::from("cli.db")),
        &[String::from(NEW_VERSIONING_FLAG)],
    );

    assert_eq!(config.database, Some(PathBuf::from("cli.db")));
    assert!(config.flags.is_enabled("other-flag"));
    assert!(config.flags.is_enabled(NEW_VERSIONING_FLAG));
}

#[test]
fn test_missing_override_keeps_configured_database() {
    let config: AppConfig = config_from(&[("BIZREG_DATABASE", "env.db")]).with_overrides(None, &[]);

    assert_eq!(config.database, Some(PathBuf::from("env.db")));
}
