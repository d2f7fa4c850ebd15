use std::collections::HashMap;

use crate::model::{CellValue, Sheet};
use crate::normalize::normalize;

/// Insertion-ordered key → normalized-values map for one sheet.
///
/// Overwriting an existing key replaces its values but keeps the original
/// insertion position: with duplicate keys the last-seen row wins, which is
/// documented behavior, not an error.
#[derive(Debug, Clone, Default)]
pub struct RowKeyMap {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl RowKeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, values: Vec<String>) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 = values,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, values));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the key → values map for one sheet.
///
/// The first cell of a row is its key; rows whose first cell is absent or
/// blank carry no key and are excluded from comparison. Remaining columns
/// normalize into an ordered values list, absent cells as empty strings.
pub fn index_sheet(sheet: &Sheet) -> RowKeyMap {
    let mut map = RowKeyMap::new();
    for row in &sheet.rows {
        let Some(Some(key_cell)) = row.cells.first() else {
            continue;
        };
        if matches!(key_cell.value, CellValue::Blank) {
            continue;
        }
        let key = normalize(&key_cell.value);
        let values = row.cells[1..]
            .iter()
            .map(|cell| match cell {
                Some(c) => normalize(&c.value),
                None => String::new(),
            })
            .collect();
        map.insert(key, values);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};

    fn text(v: &str) -> Option<Cell> {
        Some(Cell::new(CellValue::Text(v.into())))
    }

    fn sheet(rows: Vec<Vec<Option<Cell>>>) -> Sheet {
        Sheet {
            name: "s".into(),
            rows: rows.into_iter().map(|cells| Row { cells }).collect(),
        }
    }

    #[test]
    fn map_preserves_insertion_order() {
        let mut map = RowKeyMap::new();
        map.insert("b".into(), vec!["1".into()]);
        map.insert("a".into(), vec!["2".into()]);
        map.insert("c".into(), vec!["3".into()]);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_key_last_write_wins_keeps_position() {
        let mut map = RowKeyMap::new();
        map.insert("a".into(), vec!["old".into()]);
        map.insert("b".into(), vec!["x".into()]);
        map.insert("a".into(), vec!["new".into()]);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"], "overwrite keeps first position");
        assert_eq!(map.get("a"), Some(&["new".to_string()][..]));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rows_without_key_cell_are_excluded() {
        let s = sheet(vec![
            vec![text("k1"), text("a")],
            vec![None, text("orphan")],
            vec![],
            vec![Some(Cell::new(CellValue::Blank)), text("blank-key")],
        ]);
        let map = index_sheet(&s);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("k1"));
    }

    #[test]
    fn absent_value_cells_become_empty_strings() {
        let s = sheet(vec![vec![text("k1"), None, text("b")]]);
        let map = index_sheet(&s);
        assert_eq!(
            map.get("k1"),
            Some(&["".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn key_only_row_has_empty_values() {
        let s = sheet(vec![vec![text("k1")]]);
        let map = index_sheet(&s);
        assert_eq!(map.get("k1"), Some(&[][..]));
    }

    #[test]
    fn keys_are_normalized_values() {
        let s = sheet(vec![vec![
            Some(Cell::new(CellValue::Number(42.0))),
            text("v"),
        ]]);
        let map = index_sheet(&s);
        assert!(map.contains_key("42"), "numeric key normalizes to 42");
    }
}
