//! Table flattening
//!
//! Tables are read as a sequence of cell paragraphs. The default order is
//! row-major; with order fixing enabled, tables whose text visibly runs down
//! the columns (a cell's sentence continues in the cell below) are read
//! column-major instead.

use super::formatting::remove_strikethrough_text;

type CellParagraphs<'a> = Vec<&'a docx_rs::Paragraph>;

/// Rows of cells, each cell holding its paragraphs.
pub(crate) fn table_grid(table: &docx_rs::Table) -> Vec<Vec<CellParagraphs<'_>>> {
    let mut grid = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut row_cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let mut paragraphs = Vec::new();
            collect_cell_paragraphs(&cell.children, &mut paragraphs);
            row_cells.push(paragraphs);
        }

        if !row_cells.is_empty() {
            grid.push(row_cells);
        }
    }

    grid
}

fn collect_cell_paragraphs<'a>(
    contents: &'a [docx_rs::TableCellContent],
    paragraphs: &mut CellParagraphs<'a>,
) {
    for content in contents {
        match content {
            docx_rs::TableCellContent::Paragraph(para) => paragraphs.push(para),
            docx_rs::TableCellContent::Table(nested) => {
                // Nested tables are always read row-major
                for row in table_grid(nested) {
                    for cell in row {
                        paragraphs.extend(cell);
                    }
                }
            }
            _ => {}
        }
    }
}

fn cell_text(cell: &[&docx_rs::Paragraph]) -> String {
    cell.iter()
        .map(|para| remove_strikethrough_text(para).text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// `next` reads as the continuation of the sentence left open in `previous`.
pub(crate) fn continues_sentence(previous: &str, next: &str) -> bool {
    let previous = previous.trim_end();
    let next = next.trim_start();
    if previous.is_empty() || next.is_empty() {
        return false;
    }

    let open = !previous.ends_with(['.', ':', ';', '?', '!']);
    let lowercase_start = next.chars().next().is_some_and(char::is_lowercase);
    open && lowercase_start
}

/// Decide whether the table's text runs down its columns.
pub(crate) fn reads_down_columns(texts: &[Vec<String>]) -> bool {
    let mut vertical = 0;
    let mut horizontal = 0;

    for (r, row) in texts.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if let Some(right) = row.get(c + 1) {
                if continues_sentence(text, right) {
                    horizontal += 1;
                }
            }
            if let Some(below) = texts.get(r + 1).and_then(|next| next.get(c)) {
                if continues_sentence(text, below) {
                    vertical += 1;
                }
            }
        }
    }

    vertical > horizontal
}

/// Cell paragraphs of a table in reading order.
pub(crate) fn flatten_table(
    table: &docx_rs::Table,
    should_fix_order: bool,
) -> Vec<&docx_rs::Paragraph> {
    let grid = table_grid(table);

    if should_fix_order {
        let texts: Vec<Vec<String>> = grid
            .iter()
            .map(|row| row.iter().map(|cell| cell_text(cell)).collect())
            .collect();

        if reads_down_columns(&texts) {
            let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
            let mut ordered = Vec::new();
            for c in 0..columns {
                for row in &grid {
                    if let Some(cell) = row.get(c) {
                        ordered.extend(cell.iter().copied());
                    }
                }
            }
            return ordered;
        }
    }

    grid.into_iter().flatten().flatten().collect()
}
