use crate::annotate::{mark_changed_cells, mark_row, ADDED_LABEL, REMOVED_LABEL};
use crate::classify::{classify, RowClass};
use crate::index::{index_sheet, RowKeyMap};
use crate::model::{DiffStatus, Document, Fill};
use crate::report::{DiffEntry, DiffReport, PairReport, PairSummary};

/// Diff every adjacent sheet pair, annotating the document in place.
///
/// Key→value maps for all sheets are captured up front, before any mutation,
/// so annotations written for one pair never affect classification of the
/// next. A document with fewer than two sheets is returned untouched.
pub fn diff_adjacent_sheets(doc: &mut Document) -> DiffReport {
    let mut report = DiffReport::default();
    if doc.sheets.len() < 2 {
        return report;
    }

    let maps: Vec<RowKeyMap> = doc.sheets.iter().map(index_sheet).collect();

    for next_index in 1..doc.sheets.len() {
        let pair = diff_pair(doc, &maps[next_index - 1], &maps[next_index], next_index);
        report.pairs.push(pair);
    }
    report
}

fn diff_pair(
    doc: &mut Document,
    prev_map: &RowKeyMap,
    next_map: &RowKeyMap,
    next_index: usize,
) -> PairReport {
    let prev_index = next_index - 1;
    let mut entries = Vec::new();
    let mut notes = Vec::new();

    for (key, class) in classify(prev_map, next_map) {
        let status = match class {
            RowClass::Added => {
                mark_row(&mut doc.sheets[next_index], &key, Fill::Added, ADDED_LABEL);
                if let Some(values) = next_map.get(&key) {
                    notes.push(format!("Added row: {}", values.join(", ")));
                }
                DiffStatus::Added
            }
            RowClass::Removed => {
                mark_row(&mut doc.sheets[prev_index], &key, Fill::Removed, REMOVED_LABEL);
                if let Some(values) = prev_map.get(&key) {
                    notes.push(format!("Removed row: {}", values.join(", ")));
                }
                DiffStatus::Removed
            }
            RowClass::Present => {
                let prev_values = prev_map.get(&key).unwrap_or(&[]);
                let next_values = next_map.get(&key).unwrap_or(&[]);
                let changed = mark_changed_cells(
                    prev_values,
                    next_values,
                    &mut doc.sheets[next_index],
                    &key,
                );
                for &position in &changed {
                    let a = prev_values.get(position).map(String::as_str).unwrap_or("");
                    let b = next_values.get(position).map(String::as_str).unwrap_or("");
                    notes.push(format!(
                        "Column {} changed from '{a}' to '{b}'.",
                        position + 1
                    ));
                }
                if changed.is_empty() {
                    DiffStatus::Unchanged
                } else {
                    DiffStatus::ModifiedAt(changed)
                }
            }
        };
        entries.push(DiffEntry { key, status });
    }

    let summary = PairSummary::from_entries(&entries);
    PairReport {
        previous: doc.sheets[prev_index].name.clone(),
        next: doc.sheets[next_index].name.clone(),
        entries,
        notes,
        summary,
    }
}
