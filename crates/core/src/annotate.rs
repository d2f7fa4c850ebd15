use std::collections::BTreeSet;

use crate::model::{Cell, CellValue, Fill, Sheet};
use crate::normalize::normalize;

/// Status labels appended to annotated cells as `" -> <label>"`.
pub const ADDED_LABEL: &str = "Rangée ajoutée";
pub const REMOVED_LABEL: &str = "Rangée effacée";
pub const CHANGED_LABEL: &str = "Cellule modifiée";

fn row_matches_key(cells: &[Option<Cell>], key: &str) -> bool {
    match cells.first() {
        Some(Some(cell)) => normalize(&cell.value) == key,
        _ => false,
    }
}

/// Fill every cell of the first row keyed by `key` and append the status
/// label to the key cell's text. The original key value stays as a prefix.
///
/// No matching row (map/sheet inconsistency) is a silent no-op. With
/// duplicate keys only the first physical row is annotated.
pub fn mark_row(sheet: &mut Sheet, key: &str, fill: Fill, label: &str) {
    for row in &mut sheet.rows {
        if !row_matches_key(&row.cells, key) {
            continue;
        }
        for cell in row.cells.iter_mut().flatten() {
            cell.fill = Some(fill);
        }
        if let Some(Some(key_cell)) = row.cells.first_mut() {
            let prefix = normalize(&key_cell.value);
            key_cell.value = CellValue::Text(format!("{prefix} -> {label}"));
        }
        break;
    }
}

/// Compare two value lists positionally up to the longer length and mark each
/// differing position in the next sheet's row for `key`. Out-of-range
/// positions compare as empty strings; equal positions are never touched.
///
/// Returns the set of changed 0-based value-column positions.
pub fn mark_changed_cells(
    prev_values: &[String],
    next_values: &[String],
    next_sheet: &mut Sheet,
    key: &str,
) -> BTreeSet<usize> {
    let mut changed = BTreeSet::new();
    let span = prev_values.len().max(next_values.len());
    for position in 0..span {
        let prev = prev_values.get(position).map(String::as_str).unwrap_or("");
        let next = next_values.get(position).map(String::as_str).unwrap_or("");
        if prev != next {
            // Value column `position` sits at sheet column `position + 1`
            mark_cell(next_sheet, key, position + 1);
            changed.insert(position);
        }
    }
    changed
}

/// Fill and label the cell at `column` of the first row keyed by `key`,
/// creating the cell when the sparse row is shorter than `column`.
fn mark_cell(sheet: &mut Sheet, key: &str, column: usize) {
    for row in &mut sheet.rows {
        if !row_matches_key(&row.cells, key) {
            continue;
        }
        if row.cells.len() <= column {
            row.cells.resize(column + 1, None);
        }
        let cell = row.cells[column].get_or_insert_with(|| Cell::new(CellValue::Blank));
        cell.fill = Some(Fill::Changed);
        let prefix = normalize(&cell.value);
        cell.value = CellValue::Text(format!("{prefix} -> {CHANGED_LABEL}"));
        break;
    }
}
