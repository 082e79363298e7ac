//! Plain-text rendering of query results.

use bankrank_data::{Cell, QueryResult};

/// Render a query result as an aligned text table.
///
/// Numbers are right-aligned, everything else left-aligned. Reals are shown
/// with two decimals, which is the precision every stored currency value has.
pub fn render_table(result: &QueryResult) -> String {
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(format_cell).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (idx, text) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(text.chars().count());
            }
        }
    }

    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", result.query.trim()));
    output.push_str(&"=".repeat(total_width.max(result.query.trim().len())));
    output.push('\n');

    let header: Vec<String> = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, &width)| format!("{name:<width$}"))
        .collect();
    output.push_str(header.join("  ").trim_end());
    output.push('\n');
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for (row, raw) in cells.iter().zip(&result.rows) {
        let line: Vec<String> = row
            .iter()
            .zip(raw)
            .zip(&widths)
            .map(|((text, cell), &width)| {
                if cell.as_f64().is_some() {
                    format!("{text:>width$}")
                } else {
                    format!("{text:<width$}")
                }
            })
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output.push_str(&format!(
        "({} row{})\n",
        result.len(),
        if result.len() == 1 { "" } else { "s" }
    ));
    output
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Real(v) => format!("{v:.2}"),
        other => other.to_string(),
    }
}
