//! XLSX decode/encode.
//!
//! Reading goes through calamine (values plus a formula overlay), writing
//! through rust_xlsxwriter. The engine's `Fill` tags become background-color
//! formats here; everything else round-trips as typed cell writes.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Xlsx};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, Workbook as XlsxWorkbook, Worksheet, XlsxError,
};

use revdiff_core::{Cell, CellValue, DiffError, Document, Fill, Row, Sheet, Stage};

/// Background fills for annotated cells (classic light indexed palette).
const ADDED_COLOR: u32 = 0xCCFFCC;
const REMOVED_COLOR: u32 = 0xCCFFFF;
const CHANGED_COLOR: u32 = 0xFFFF99;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decode a workbook from a file path.
pub fn decode_path(path: &Path) -> Result<Document, DiffError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        DiffError::with_source(
            Stage::Decode,
            format!("cannot open workbook {}", path.display()),
            e,
        )
    })?;
    build_document(&mut workbook)
}

/// Decode a workbook from in-memory xlsx bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Document, DiffError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| DiffError::with_source(Stage::Decode, "cannot open workbook", e))?;
    build_document(&mut workbook)
}

fn build_document<RS, R>(workbook: &mut R) -> Result<Document, DiffError>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(DiffError::new(Stage::Decode, "workbook contains no sheets"));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            DiffError::with_source(
                Stage::Decode,
                format!("cannot read sheet '{sheet_name}'"),
                e,
            )
        })?;

        let mut sheet = Sheet {
            name: sheet_name.clone(),
            rows: Vec::new(),
        };

        // Data may not begin at A1; keep absolute positions.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        for (row_idx, row) in range.rows().enumerate() {
            let target_row = start_row as usize + row_idx;
            for (col_idx, data) in row.iter().enumerate() {
                let target_col = start_col as usize + col_idx;
                let Some(value) = convert_data(data) else {
                    continue;
                };
                set_cell(&mut sheet, target_row, target_col, value);
            }
        }

        // Formula overlay: formulas compare by source text, not cached value.
        if let Ok(formula_range) = workbook.worksheet_formula(sheet_name) {
            let (start_row, start_col) = formula_range.start().unwrap_or((0, 0));
            for (row_idx, row) in formula_range.rows().enumerate() {
                for (col_idx, formula) in row.iter().enumerate() {
                    if formula.is_empty() {
                        continue;
                    }
                    let src = formula.strip_prefix('=').unwrap_or(formula).to_string();
                    set_cell(
                        &mut sheet,
                        start_row as usize + row_idx,
                        start_col as usize + col_idx,
                        CellValue::Formula(src),
                    );
                }
            }
        }

        sheets.push(sheet);
    }

    Ok(Document { sheets })
}

fn convert_data(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(CellValue::Text(s.clone()))
            }
        }
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::DateTime(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Error(format!("#{e:?}"))),
    }
}

fn set_cell(sheet: &mut Sheet, row: usize, col: usize, value: CellValue) {
    if sheet.rows.len() <= row {
        sheet.rows.resize_with(row + 1, Row::default);
    }
    let cells = &mut sheet.rows[row].cells;
    if cells.len() <= col {
        cells.resize(col + 1, None);
    }
    cells[col] = Some(Cell::new(value));
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encode a document to in-memory xlsx bytes.
pub fn encode_bytes(doc: &Document) -> Result<Vec<u8>, DiffError> {
    let mut workbook = build_workbook(doc)?;
    workbook
        .save_to_buffer()
        .map_err(|e| DiffError::with_source(Stage::Encode, "cannot serialize workbook", e))
}

/// Encode a document to a file path.
pub fn encode_path(doc: &Document, path: &Path) -> Result<(), DiffError> {
    let mut workbook = build_workbook(doc)?;
    workbook.save(path).map_err(|e| {
        DiffError::with_source(
            Stage::Encode,
            format!("cannot write workbook {}", path.display()),
            e,
        )
    })
}

fn build_workbook(doc: &Document) -> Result<XlsxWorkbook, DiffError> {
    let mut workbook = XlsxWorkbook::new();

    // Fixed creation timestamp keeps output byte-identical across runs.
    let created = ExcelDateTime::from_ymd(1980, 1, 1).map_err(|e| {
        DiffError::with_source(Stage::Encode, "cannot build creation timestamp", e)
    })?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    for sheet in &doc.sheets {
        let worksheet = workbook.add_worksheet().set_name(&sheet.name).map_err(|e| {
            DiffError::with_source(
                Stage::Encode,
                format!("cannot create sheet '{}'", sheet.name),
                e,
            )
        })?;
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.cells.iter().enumerate() {
                let Some(cell) = cell else { continue };
                write_cell(worksheet, row_idx as u32, col_idx as u16, cell).map_err(|e| {
                    DiffError::with_source(
                        Stage::Encode,
                        format!(
                            "cannot write cell ({row_idx}, {col_idx}) of sheet '{}'",
                            sheet.name
                        ),
                        e,
                    )
                })?;
            }
        }
    }
    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> Result<(), XlsxError> {
    let format = fill_format(cell.fill);
    match (&cell.value, format) {
        (CellValue::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s, &f)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (CellValue::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, &f)?;
        }
        (CellValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (CellValue::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, &f)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::DateTime(serial), f) => {
            // The serial number plus a date-time number format restores the
            // original display.
            let date_format = f.unwrap_or_else(Format::new).set_num_format(DATETIME_FORMAT);
            worksheet.write_number_with_format(row, col, *serial, &date_format)?;
        }
        (CellValue::Formula(src), Some(f)) => {
            worksheet.write_formula_with_format(row, col, src.as_str(), &f)?;
        }
        (CellValue::Formula(src), None) => {
            worksheet.write_formula(row, col, src.as_str())?;
        }
        (CellValue::Error(code), Some(f)) => {
            worksheet.write_string_with_format(row, col, code, &f)?;
        }
        (CellValue::Error(code), None) => {
            worksheet.write_string(row, col, code)?;
        }
        (CellValue::Blank, Some(f)) => {
            worksheet.write_blank(row, col, &f)?;
        }
        // An unfilled blank cell writes nothing.
        (CellValue::Blank, None) => {}
    }
    Ok(())
}

fn fill_format(fill: Option<Fill>) -> Option<Format> {
    fill.map(|fill| {
        let rgb = match fill {
            Fill::Added => ADDED_COLOR,
            Fill::Removed => REMOVED_COLOR,
            Fill::Changed => CHANGED_COLOR,
        };
        Format::new().set_background_color(Color::RGB(rgb))
    })
}
