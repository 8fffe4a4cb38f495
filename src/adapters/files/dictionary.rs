//! Generated data dictionary
//!
//! Renders a human-readable `README.md` for the files sink, listing every
//! table with its columns, types and descriptions. The content comes from
//! the table metadata, so it always matches the CSV files written next to it.

use crate::domain::tables::TableKind;

/// Render the full data dictionary as Markdown
pub fn render_dictionary() -> String {
    let mut out = String::new();

    out.push_str("# Healthcare ERP Synthetic Dataset\n\n");
    out.push_str(&format!(
        "Generated by karoo v{}. All rows are synthetic: facilities, patients, \
         visits and stock movements are sampled from weighted distributions and \
         contain no real-world data. Patient identifiers are salted hashes of a \
         sequence number, not references to any person.\n\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(
        "Each table below is written as a CSV file of the same name. Dimension \
         tables describe the entities; fact tables reference them by id.\n",
    );

    out.push_str("\n## Dimension tables\n");
    for kind in TableKind::ALL.iter().filter(|k| k.is_dimension()) {
        render_table(&mut out, *kind);
    }

    out.push_str("\n## Fact tables\n");
    for kind in TableKind::ALL.iter().filter(|k| !k.is_dimension()) {
        render_table(&mut out, *kind);
    }

    out
}

fn render_table(out: &mut String, kind: TableKind) {
    out.push_str(&format!("\n### `{}`\n\n", kind.table_name()));
    out.push_str(&format!("{}.\n\n", kind.description()));
    out.push_str("| Column | Type | Nullable | Description |\n");
    out.push_str("|--------|------|----------|-------------|\n");

    for column in kind.columns() {
        out.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            column.name,
            column.ty.dictionary_label(),
            if column.nullable { "yes" } else { "no" },
            column.description
        ));
    }
}
