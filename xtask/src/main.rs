// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the registry workspace.
//!
//! - `cargo xtask ci` runs lint, build, test, migration verification and
//!   the smoke run
//! - `cargo xtask verify-migrations` checks the embedded `SQLite` migrations
//!   apply cleanly, leave no dangling foreign keys, and revert and
//!   re-apply to an identical schema
//! - `cargo xtask smoke` drives the `bizreg` binary end to end against a
//!   scratch database file
//!
//! Everything runs against `SQLite`; no external services are needed.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    io,
    path::{Path, PathBuf},
    process::Output,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything CI runs, migrations and smoke run included
    CI,

    /// Build every workspace crate
    #[command(visible_alias = "b")]
    Build,

    /// Type-check the workspace
    #[command(visible_alias = "c")]
    Check,

    /// Formatting, clippy and rustdoc lints
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy over all targets
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Rustdoc with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Fail on unformatted code
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Rewrite sources with rustfmt
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Library tests, then doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Doc tests only
    #[command(visible_alias = "td")]
    TestDocs,

    /// Library tests only
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply, revert and re-apply the `SQLite` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,

    /// Run the `bizreg` binary against a scratch database
    #[command(visible_alias = "s")]
    Smoke,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
            Self::Smoke => smoke(),
        }
    }
}

/// The CI sequence. Stops at the first failure.
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    smoke()?;
    Ok(())
}

/// `cargo build` over the workspace.
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// `cargo check` over the workspace.
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// All lints, clippy first.
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Clippy with warnings denied.
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Rustdoc for each registry library, warnings denied.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// `cargo fmt --check`.
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// `cargo fmt`.
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Library tests, then doc tests.
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // slowest
    Ok(())
}

/// Doc tests for the default members.
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Library tests for the default members.
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// `cargo <command> <args>` on the active toolchain.
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Same as [`run_cargo`] on nightly.
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // set by cargo when invoked as `cargo xtask`
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the embedded migrations against a scratch in-memory database.
///
/// 1. Applies every pending migration
/// 2. Runs `PRAGMA foreign_key_check`; any dangling reference fails
/// 3. Records the schema, reverts every migration and checks no table is left
/// 4. Re-applies the migrations and compares the schema with step 3
fn verify_migrations() -> Result<()> {
    tracing::info!("Verifying SQLite migrations");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to open in-memory SQLite database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migrations", applied.len());

    check_foreign_keys(&mut conn)?;
    let first = introspect_sqlite_schema(&mut conn)?;
    tracing::info!("Schema has {} tables", first.tables.len());

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {e}"))?;
    let reverted = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        bail!(
            "Tables left after reverting migrations: {:?}",
            reverted.tables.keys().collect::<Vec<_>>()
        );
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to re-apply migrations: {e}"))?;
    let second = introspect_sqlite_schema(&mut conn)?;
    compare_schemas(&first, &second)?;

    tracing::info!("Migrations verified");
    Ok(())
}

fn check_foreign_keys(conn: &mut SqliteConnection) -> Result<()> {
    #[derive(QueryableByName)]
    struct Violation {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        parent: String,
    }

    let violations: Vec<Violation> = diesel::sql_query("PRAGMA foreign_key_check")
        .load(conn)
        .wrap_err("Failed to run foreign key check")?;

    if let Some(first) = violations.first() {
        bail!(
            "{} foreign key violations, first in {} referencing {}",
            violations.len(),
            first.table,
            first.parent
        );
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, PartialEq, Eq)]
struct Column {
    declared_type: String,
    nullable: bool,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    unique: bool,
    columns: Vec<String>,
}

/// Tables of the open database with their columns, foreign keys and indexes.
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(
                col.name,
                Column {
                    declared_type: col.r#type.to_uppercase(),
                    nullable: col.notnull == 0,
                },
            );
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info.indexes.insert(Index {
                name: idx.name,
                unique: idx.unique != 0,
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Fails when a table was added, dropped or changed shape.
fn compare_schemas(before: &Schema, after: &Schema) -> Result<()> {
    let before_tables: BTreeSet<&String> = before.tables.keys().collect();
    let after_tables: BTreeSet<&String> = after.tables.keys().collect();
    if before_tables != after_tables {
        bail!("Table sets differ after re-applying: {before_tables:?} vs {after_tables:?}");
    }

    for (name, table) in &before.tables {
        if after.tables.get(name) != Some(table) {
            bail!("Table {name} differs after re-applying migrations");
        }
    }

    Ok(())
}

/// Scratch database used by [`smoke`]. Removed before and after the run.
fn smoke_database() -> PathBuf {
    std::env::temp_dir().join(format!("bizreg-smoke-{}.db", std::process::id()))
}

/// Run `bizreg` with `args` against the scratch database, returning stdout.
fn run_bizreg(database: &Path, args: &[&str]) -> Result<String> {
    let mut full: Vec<String> = vec![
        "run".into(),
        "--quiet".into(),
        "--package".into(),
        "bizreg-cli".into(),
        "--".into(),
        "--database".into(),
        database.display().to_string(),
    ];
    full.extend(args.iter().map(ToString::to_string));

    let output = cmd("cargo", full)
        .env("BIZREG_LOG_LEVEL", "warn")
        .stdout_capture()
        .unchecked()
        .run_with_trace()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        bail!("bizreg {} failed: {stdout}", args.join(" "));
    }
    Ok(stdout)
}

/// Drive the binary against a fresh scratch database.
fn smoke() -> Result<()> {
    let database = smoke_database();
    let _ = std::fs::remove_file(&database);
    let result = smoke_steps(&database);
    let _ = std::fs::remove_file(&database);
    result?;
    tracing::info!("Smoke run passed");
    Ok(())
}

/// Create the database, look up a fee code, and confirm an unknown
/// business is reported as missing.
fn smoke_steps(database: &Path) -> Result<()> {
    let init = run_bizreg(database, &["init"])?;
    if !init.contains("\"versioning\"") {
        bail!("init printed no versioning engine: {init}");
    }

    let fee = run_bizreg(
        database,
        &[
            "fee-code",
            "--filing-type",
            "annualReport",
            "--legal-type",
            "BEN",
        ],
    )?;
    if !fee.contains("BCANN") {
        bail!("unexpected fee code output: {fee}");
    }

    if run_bizreg(database, &["business", "--identifier", "BC0000001"]).is_ok() {
        bail!("looking up an unknown business should fail");
    }
    Ok(())
}

/// Logs a `duct` command before running it.
trait ExpressionExt {
    /// Logs then runs the expression.
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // echo the command next to the failure
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
