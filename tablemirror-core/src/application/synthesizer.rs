// tablemirror-core/src/application/synthesizer.rs

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::document::{ColumnSpec, OrderedMap};
use crate::domain::schema::{Catalog, MirrorTable};
use crate::error::MirrorError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, ExistingColumn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SynthesisOutcome {
    /// The table did not exist and was created.
    Created,
    /// The table existed with every declared column.
    Unchanged,
    /// The table existed; the listed columns were appended.
    Extended { added: Vec<String> },
}

/// Differences between the declared schema and an existing table that the
/// synthesizer leaves alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnDrift {
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },
    Undeclared {
        column: String,
    },
    /// Column appended to an existing table without a constraint it would
    /// have had on creation.
    ConstraintSkipped {
        column: String,
        constraint: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    pub table: String,
    pub outcome: SynthesisOutcome,
    pub drift: Vec<ColumnDrift>,
}

pub struct SchemaSynthesizer;

impl SchemaSynthesizer {
    /// Provisions the mirror of one declared table.
    ///
    /// Create-if-absent: an existing table only ever gains the columns it is
    /// missing. Nothing is dropped, truncated or retyped, so running twice is
    /// harmless.
    #[instrument(skip(connector, schema, catalog), fields(engine = %connector.dialect()))]
    pub async fn synthesize(
        connector: &dyn Connector,
        table_name: &str,
        schema: &OrderedMap<ColumnSpec>,
        catalog: &mut Catalog,
    ) -> Result<SynthesisReport, MirrorError> {
        let declared = MirrorTable::from_schema(table_name, schema)?;
        let table = catalog.register(declared).clone();

        let write_error = |source: InfrastructureError| MirrorError::SchemaWrite {
            table: table.name.clone(),
            source,
        };

        let Some(stored_name) = connector
            .find_table(&table.name)
            .await
            .map_err(write_error)?
        else {
            connector
                .create_table_if_absent(&table)
                .await
                .map_err(write_error)?;
            info!(table = %table.name, columns = table.columns.len(), "Mirror table created");
            return Ok(SynthesisReport {
                table: table.name.clone(),
                outcome: SynthesisOutcome::Created,
                drift: Vec::new(),
            });
        };

        if stored_name != table.name {
            warn!(table = %table.name, stored = %stored_name, "Reconciling with the existing table of a differently cased name");
        }

        let existing = connector
            .fetch_columns(&stored_name)
            .await
            .map_err(write_error)?;

        let mut drift = Self::detect_drift(connector, &table, &existing);

        let mut added = Vec::new();
        for column in &table.columns {
            if find_column(&existing, &column.name).is_some() {
                continue;
            }
            connector
                .add_column(&stored_name, column)
                .await
                .map_err(write_error)?;
            info!(table = %stored_name, column = %column.name, "Column added to existing mirror table");
            for constraint in connector.dialect().constraints_lost_on_add(column) {
                drift.push(ColumnDrift::ConstraintSkipped {
                    column: column.name.clone(),
                    constraint: constraint.to_string(),
                });
            }
            added.push(column.name.clone());
        }

        for item in &drift {
            warn!(table = %table.name, drift = ?item, "Existing table differs from the declared schema");
        }

        let outcome = if added.is_empty() {
            SynthesisOutcome::Unchanged
        } else {
            SynthesisOutcome::Extended { added }
        };

        Ok(SynthesisReport {
            table: stored_name,
            outcome,
            drift,
        })
    }

    fn detect_drift(
        connector: &dyn Connector,
        table: &MirrorTable,
        existing: &[ExistingColumn],
    ) -> Vec<ColumnDrift> {
        let dialect = connector.dialect();
        let mut drift = Vec::new();

        for column in &table.columns {
            if let Some(actual) = find_column(existing, &column.name)
                && !dialect.type_matches(&column.column_type, &actual.data_type)
            {
                drift.push(ColumnDrift::TypeMismatch {
                    column: column.name.clone(),
                    expected: dialect.type_sql(&column.column_type),
                    actual: actual.data_type.clone(),
                });
            }
        }

        for actual in existing {
            if !table
                .columns
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&actual.name))
            {
                drift.push(ColumnDrift::Undeclared {
                    column: actual.name.clone(),
                });
            }
        }

        drift
    }
}

fn find_column<'a>(existing: &'a [ExistingColumn], name: &str) -> Option<&'a ExistingColumn> {
    existing.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}
