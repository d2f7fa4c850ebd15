//! `revdiff-core` — keyed sheet-revision diff engine.
//!
//! Pure engine crate: receives a decoded document, annotates it in place,
//! returns a diff report. No CLI or IO dependencies.

pub mod annotate;
pub mod classify;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod normalize;
pub mod report;

pub use engine::diff_adjacent_sheets;
pub use error::{DiffError, Stage};
pub use index::{index_sheet, RowKeyMap};
pub use model::{Cell, CellValue, DiffStatus, Document, Fill, Row, Sheet};
pub use report::{DiffEntry, DiffReport, PairReport, PairSummary};
