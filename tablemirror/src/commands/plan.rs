// tablemirror/src/commands/plan.rs
//
// USE CASE: Dry run. Shows what `run` would provision, without touching a store.

use comfy_table::Table;
use std::path::Path;

use tablemirror_core::MirrorError;
use tablemirror_core::application::plan_mirror;
use tablemirror_core::domain::schema::Dialect;
use tablemirror_core::infrastructure::config::load_document;

pub fn execute(config: &Path, dialect: Dialect) -> anyhow::Result<()> {
    println!("⚙️  Loading {}...", config.display());
    let document = load_document(config).map_err(MirrorError::from)?;
    let tables = plan_mirror(&document)?;

    println!(
        "📝 {} mirror table(s) planned ({} dialect)",
        tables.len(),
        dialect
    );

    for mirror in &tables {
        println!("\n🪞 {}", mirror.name);

        let mut grid = Table::new();
        grid.set_header(vec!["Column", "Type", "Primary key", "SQL"]);
        for column in &mirror.columns {
            grid.add_row(vec![
                column.name.clone(),
                column.column_type.to_string(),
                if column.primary_key { "yes" } else { "" }.to_string(),
                dialect.type_sql(&column.column_type),
            ]);
        }
        println!("{grid}");

        for statement in dialect.create_table_statements(mirror) {
            println!("{};", statement);
        }
    }

    Ok(())
}
