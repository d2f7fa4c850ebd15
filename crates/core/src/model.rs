use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Document arena
// ---------------------------------------------------------------------------

/// In-memory workbook: ordered sheets, exclusively owned by one diff pass and
/// mutated in place during annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Sparse row: `None` marks an absent cell so later positions stay stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub fill: Option<Fill>,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self { value, fill: None }
    }
}

/// Typed cell content as decoded from the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Date-formatted numeric, kept as an Excel serial (1900 date system).
    DateTime(f64),
    /// Formula source text, without the leading `=`.
    Formula(String),
    /// Cell error code rendered as text (e.g. `#DIV/0!`).
    Error(String),
    Blank,
}

// ---------------------------------------------------------------------------
// Diff annotations
// ---------------------------------------------------------------------------

/// Highlight applied to annotated rows/cells. Concrete colors are an encode
/// concern; the engine only tags intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Added,
    Removed,
    Changed,
}

/// Final classification of one key across a sheet pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
    /// 0-based value-column positions that differ (column 1 of the sheet is
    /// position 0, the key column is never compared).
    ModifiedAt(BTreeSet<usize>),
}
