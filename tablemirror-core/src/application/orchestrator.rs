// tablemirror-core/src/application/orchestrator.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::application::synthesizer::{SchemaSynthesizer, SynthesisReport};
use crate::domain::document::ConfigDocument;
use crate::domain::schema::{Catalog, MirrorTable};
use crate::domain::validation::validate_document;
use crate::error::MirrorError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::Connector;

/// What happens when one table cannot be synthesized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing table and return its error.
    #[default]
    FailFast,
    /// Attempt every table and report all failures in the result.
    Collect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "table", rename_all = "snake_case")]
pub enum RunState {
    Loaded,
    Validated,
    Synthesizing(String),
    Synthesized(String),
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableFailure {
    pub source: String,
    pub table: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub state: RunState,
    pub policy: FailurePolicy,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tables: Vec<SynthesisReport>,
    pub errors: Vec<TableFailure>,
    pub catalog: Catalog,
}

impl RunResult {
    pub fn to_json(&self) -> Result<String, MirrorError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MirrorError::Infrastructure(InfrastructureError::Json(e)))
    }
}

struct RunTracker {
    state: RunState,
}

impl RunTracker {
    fn advance(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "Run state transition");
        self.state = next;
    }
}

/// Validates the document, then provisions every declared table in
/// document order against `connector`.
///
/// Validation failures are returned before any DDL is issued.
pub async fn run_mirror(
    document: &ConfigDocument,
    connector: &dyn Connector,
    policy: FailurePolicy,
) -> Result<RunResult, MirrorError> {
    let started_at = Utc::now();
    let mut tracker = RunTracker {
        state: RunState::Loaded,
    };

    let summary = validate_document(document).inspect_err(|e| {
        tracker.advance(RunState::Failed);
        error!("Document validation failed: {}", e);
    })?;
    tracker.advance(RunState::Validated);
    println!(
        "✅ Document valid: {} external source(s), {} table(s), {} file source(s), {} process(es)",
        summary.external_sources, summary.tables, summary.file_sources, summary.processes
    );

    // Fresh catalog for every run, handed explicitly to the synthesizer.
    let mut catalog = Catalog::new();
    let mut tables = Vec::new();
    let mut errors = Vec::new();

    for declared in document.declared_tables() {
        println!(
            "🪞 Creating mirror table for: {} (source '{}')",
            declared.name, declared.source.name
        );
        tracker.advance(RunState::Synthesizing(declared.name.to_string()));

        match SchemaSynthesizer::synthesize(connector, declared.name, declared.schema, &mut catalog)
            .await
        {
            Ok(report) => {
                tracker.advance(RunState::Synthesized(declared.name.to_string()));
                tables.push(report);
            }
            Err(e) => {
                error!(source = %declared.source.name, table = declared.name, "Synthesis failed: {}", e);
                match policy {
                    FailurePolicy::FailFast => {
                        tracker.advance(RunState::Failed);
                        return Err(e);
                    }
                    FailurePolicy::Collect => errors.push(TableFailure {
                        source: declared.source.name.clone(),
                        table: declared.name.to_string(),
                        error: e.to_string(),
                    }),
                }
            }
        }
    }

    let success = errors.is_empty();
    tracker.advance(if success {
        RunState::Completed
    } else {
        RunState::Failed
    });

    if success {
        println!("✨ Mirror tables created successfully ({}).", tables.len());
    } else {
        println!(
            "❌ {} of {} mirror table(s) failed.",
            errors.len(),
            tables.len() + errors.len()
        );
    }
    info!(tables = tables.len(), failures = errors.len(), "Run finished");

    Ok(RunResult {
        success,
        state: tracker.state,
        policy,
        started_at,
        finished_at: Utc::now(),
        tables,
        errors,
        catalog,
    })
}

/// Dry run: validates and maps every declared table without a store.
pub fn plan_mirror(document: &ConfigDocument) -> Result<Vec<MirrorTable>, MirrorError> {
    validate_document(document)?;

    let mut catalog = Catalog::new();
    for declared in document.declared_tables() {
        catalog.register(MirrorTable::from_schema(declared.name, declared.schema)?);
    }
    Ok(catalog.tables().to_vec())
}
