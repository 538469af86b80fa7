// tablemirror/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tablemirror_core::domain::schema::Dialect;
use tablemirror_core::infrastructure::config::connection::DEFAULT_DUCKDB_PATH;
use tablemirror_core::infrastructure::config::{TargetEngine, TargetSettings};

#[derive(Parser)]
#[command(name = "tablemirror")]
#[command(about = "Provisions mirror tables from an external sources document", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// External sources document (YAML)
    #[arg(long, short, env = "TABLEMIRROR_CONFIG", default_value = "tablemirror.yaml")]
    pub config: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Store receiving the mirror tables
    #[arg(long, value_enum, env = "TABLEMIRROR_TARGET", default_value = "duckdb")]
    pub target: Target,

    /// DuckDB database file (":memory:" for a throwaway store)
    #[arg(long, env = "TABLEMIRROR_DB_PATH", default_value = DEFAULT_DUCKDB_PATH)]
    pub db_path: String,

    /// PostgreSQL URL. Assembled from POSTGRES_* variables when absent.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Duckdb,
    Postgres,
}

impl From<Target> for TargetEngine {
    fn from(target: Target) -> Self {
        match target {
            Target::Duckdb => TargetEngine::DuckDB,
            Target::Postgres => TargetEngine::Postgres,
        }
    }
}

impl From<Target> for Dialect {
    fn from(target: Target) -> Self {
        match target {
            Target::Duckdb => Dialect::DuckDb,
            Target::Postgres => Dialect::Postgres,
        }
    }
}

impl From<TargetArgs> for TargetSettings {
    fn from(args: TargetArgs) -> Self {
        TargetSettings {
            engine: args.target.into(),
            duckdb_path: args.db_path,
            database_url: args.database_url,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🪞 Validates the document and provisions every mirror table
    Run {
        #[command(flatten)]
        document: DocumentArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Attempt every table and report all failures instead of stopping at the first
        #[arg(long, default_value = "false")]
        keep_going: bool,

        /// Write the run report (JSON) to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// ✅ Validates the document without touching any store
    Validate {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// 📝 Shows the mirror tables and the DDL a run would issue
    Plan {
        #[command(flatten)]
        document: DocumentArgs,

        /// SQL dialect used to render the DDL
        #[arg(long, value_enum, default_value = "duckdb")]
        dialect: Target,
    },

    /// 🔍 Inspects a mirror table stored in DuckDB (columns + row count)
    Inspect {
        /// Path to the DuckDB database file
        #[arg(long, env = "TABLEMIRROR_DB_PATH", default_value = DEFAULT_DUCKDB_PATH)]
        db_path: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["tablemirror", "run"])?;
        match args.command {
            Commands::Run {
                target,
                keep_going,
                report,
                ..
            } => {
                assert_eq!(target.target, Target::Duckdb);
                assert!(!keep_going);
                assert_eq!(report, None);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_postgres() -> Result<()> {
        let args = Cli::try_parse_from([
            "tablemirror",
            "run",
            "--config",
            "/etc/sources.yaml",
            "--target",
            "postgres",
            "--database-url",
            "postgresql://u:p@localhost/db",
            "--keep-going",
        ])?;
        match args.command {
            Commands::Run {
                document,
                target,
                keep_going,
                ..
            } => {
                assert_eq!(document.config.to_string_lossy(), "/etc/sources.yaml");
                assert!(keep_going);
                let settings = TargetSettings::from(target);
                assert_eq!(settings.engine, TargetEngine::Postgres);
                assert_eq!(
                    settings.database_url.as_deref(),
                    Some("postgresql://u:p@localhost/db")
                );
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_plan() -> Result<()> {
        let args = Cli::try_parse_from(["tablemirror", "plan", "--dialect", "postgres"])?;
        match args.command {
            Commands::Plan { dialect, .. } => {
                assert_eq!(dialect, Target::Postgres);
                Ok(())
            }
            _ => bail!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::try_parse_from(["tablemirror", "inspect", "--table", "users"])?;
        match args.command {
            Commands::Inspect { table, limit, .. } => {
                assert_eq!(table, "users");
                assert_eq!(limit, 5);
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }
}
