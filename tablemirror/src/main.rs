// tablemirror/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use tablemirror_core::MirrorError;

#[tokio::main]
async fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug tablemirror run ... pour voir les détails
    // Logs go to stderr, stdout stays for the progress lines.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        // --- USE CASE: RUN ---
        Commands::Run {
            document,
            target,
            keep_going,
            report,
        } => commands::run::execute(&document.config, target.into(), keep_going, report).await,

        // --- USE CASE: VALIDATE ---
        Commands::Validate { document } => commands::validate::execute(&document.config),

        // --- USE CASE: PLAN (DRY RUN) ---
        Commands::Plan { document, dialect } => {
            commands::plan::execute(&document.config, dialect.into())
        }

        // --- USE CASE: INSPECT ---
        Commands::Inspect {
            db_path,
            table,
            limit,
        } => commands::inspect::execute(&db_path, &table, limit).await,
    };

    if let Err(e) = result {
        report_failure(e);
        // Exit with error code for CI/CD
        std::process::exit(1);
    }
}

fn report_failure(error: anyhow::Error) {
    match error.downcast::<MirrorError>() {
        // Domain and document errors carry miette diagnostics (source span, help).
        Ok(mirror) => eprintln!("\n💥 {:?}", miette::Report::new(mirror)),
        Err(other) => eprintln!("\n❌ {:#}", other),
    }
}
