// tablemirror/src/commands/inspect.rs
//
// USE CASE: Inspect a mirror table stored in DuckDB (columns, row count, sample rows).

use comfy_table::Table;
use std::path::Path;

use tablemirror_core::MirrorError;
use tablemirror_core::infrastructure::adapters::DuckDBConnector;
use tablemirror_core::ports::connector::Connector;

pub async fn execute(db_path: &str, table: &str, limit: usize) -> anyhow::Result<()> {
    // Opening a missing file would silently create an empty database.
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'tablemirror run'?",
            db_path
        );
    }

    let connector = DuckDBConnector::new(db_path).map_err(MirrorError::from)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let columns = connector
        .fetch_columns(table)
        .await
        .map_err(MirrorError::from)?;
    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' does not exist in {}", table, db_path);
    }

    let mut schema = Table::new();
    schema.set_header(vec!["Column", "Type", "Nullable"]);
    for column in &columns {
        schema.add_row(vec![
            column.name.clone(),
            column.data_type.clone(),
            if column.is_nullable { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{schema}");

    let count = connector.row_count(table).map_err(MirrorError::from)?;
    println!("   Rows: {}", count);

    if count > 0 {
        println!("   --- Rows (Limit {}) ---", limit);
        for values in connector.sample_rows(table, limit).map_err(MirrorError::from)? {
            println!("   ➜ {}", values.join(" | "));
        }
    }

    Ok(())
}
