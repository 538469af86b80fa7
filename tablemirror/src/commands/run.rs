// tablemirror/src/commands/run.rs
//
// USE CASE: Provision the mirror tables declared by the document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tablemirror_core::MirrorError;
use tablemirror_core::application::{FailurePolicy, SynthesisOutcome, run_mirror};
use tablemirror_core::domain::validate_document;
use tablemirror_core::infrastructure::adapters::DuckDBConnector;
use tablemirror_core::infrastructure::config::{TargetEngine, TargetSettings, load_document};
use tablemirror_core::infrastructure::fs::write_json_atomic;
use tablemirror_core::ports::connector::Connector;

pub async fn execute(
    config: &Path,
    settings: TargetSettings,
    keep_going: bool,
    report: Option<PathBuf>,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the document (Infra)
    println!("⚙️  Loading {}...", config.display());
    let document = load_document(config).map_err(MirrorError::from)?;

    // B. Validate before any connection attempt: an invalid document must
    // report its own finding, not an unreachable store.
    validate_document(&document).map_err(MirrorError::from)?;

    // C. Open the target store. Dropped (and closed) on every path out of this function.
    let connector = open_connector(&settings).await?;

    // D. Run (Application Layer)
    let policy = if keep_going {
        FailurePolicy::Collect
    } else {
        FailurePolicy::FailFast
    };
    let result = run_mirror(&document, connector.as_ref(), policy).await?;

    for table in &result.tables {
        let status = match &table.outcome {
            SynthesisOutcome::Created => "created".to_string(),
            SynthesisOutcome::Unchanged => "already up to date".to_string(),
            SynthesisOutcome::Extended { added } => format!("added {}", added.join(", ")),
        };
        println!("   ➜ {}: {}", table.table, status);
        if !table.drift.is_empty() {
            println!(
                "     ⚠️  {} difference(s) with the existing table left untouched",
                table.drift.len()
            );
        }
    }

    if let Some(path) = report {
        write_json_atomic(&path, &result).map_err(MirrorError::from)?;
        println!("📄 Run report saved to {}", path.display());
    }

    if !result.success {
        for failure in &result.errors {
            eprintln!(
                "   ❌ {} (source '{}'): {}",
                failure.table, failure.source, failure.error
            );
        }
        anyhow::bail!("{} mirror table(s) failed", result.errors.len());
    }

    println!("\n✨ SUCCESS! Run finished in {:.2?}", start.elapsed());
    Ok(())
}

async fn open_connector(settings: &TargetSettings) -> anyhow::Result<Box<dyn Connector>> {
    tracing::info!(engine = ?settings.engine, "Opening target store");
    match settings.engine {
        TargetEngine::DuckDB => {
            println!("   Target: DuckDB 🦆 ({})", settings.duckdb_path);
            let connector = DuckDBConnector::new(&settings.duckdb_path)
                .with_context(|| format!("Failed to open DuckDB at {}", settings.duckdb_path))?;
            Ok(Box::new(connector))
        }
        TargetEngine::Postgres => open_postgres(settings).await,
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(settings: &TargetSettings) -> anyhow::Result<Box<dyn Connector>> {
    use tablemirror_core::infrastructure::adapters::PostgresConnector;

    println!("   Target: PostgreSQL 🐘");
    let url = settings.postgres_url().map_err(MirrorError::from)?;
    let connector = PostgresConnector::connect(&url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    Ok(Box::new(connector))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_settings: &TargetSettings) -> anyhow::Result<Box<dyn Connector>> {
    anyhow::bail!("this build has no PostgreSQL support, rebuild with `--features postgres`")
}
