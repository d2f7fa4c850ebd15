use chrono::{Duration, NaiveDate};

use crate::model::CellValue;

/// Render a cell value as its canonical comparable string.
///
/// Deterministic and total: every well-formed value has exactly one
/// rendering, and no variant can fail. Values compare as these strings, so
/// two cells are "equal" iff they render identically.
pub fn normalize(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => {
            // Integers render without a trailing .0
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        CellValue::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        CellValue::DateTime(serial) => render_serial(*serial),
        CellValue::Formula(src) => src.clone(),
        CellValue::Error(code) => code.clone(),
        CellValue::Blank => String::new(),
    }
}

/// Excel 1900-system serial → `YYYY-MM-DD HH:MM:SS`.
///
/// Serial day 0 is 1899-12-30, which absorbs Excel's fictitious 1900-02-29.
fn render_serial(serial: f64) -> String {
    let days = serial.floor() as i64;
    let secs = ((serial - serial.floor()) * 86_400.0).round() as i64;
    let rendered = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.and_hms_opt(0, 0, 0))
        .and_then(|epoch| {
            Duration::try_days(days).and_then(|d| epoch.checked_add_signed(d))
        })
        .and_then(|dt| {
            Duration::try_seconds(secs).and_then(|s| dt.checked_add_signed(s))
        })
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string());
    match rendered {
        Some(s) => s,
        // Serial outside chrono's range: fall back to the raw number.
        None => format!("{serial}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_literal() {
        assert_eq!(normalize(&CellValue::Text("hello".into())), "hello");
        assert_eq!(normalize(&CellValue::Text(String::new())), "");
    }

    #[test]
    fn integral_number_has_no_decimal() {
        assert_eq!(normalize(&CellValue::Number(42.0)), "42");
        assert_eq!(normalize(&CellValue::Number(-3.0)), "-3");
        assert_eq!(normalize(&CellValue::Number(0.0)), "0");
    }

    #[test]
    fn fractional_number_uses_default_rendering() {
        assert_eq!(normalize(&CellValue::Number(3.25)), "3.25");
        assert_eq!(normalize(&CellValue::Number(-0.5)), "-0.5");
    }

    #[test]
    fn bool_is_lowercase() {
        assert_eq!(normalize(&CellValue::Bool(true)), "true");
        assert_eq!(normalize(&CellValue::Bool(false)), "false");
    }

    #[test]
    fn formula_renders_source_not_result() {
        assert_eq!(normalize(&CellValue::Formula("SUM(A1:A3)".into())), "SUM(A1:A3)");
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(normalize(&CellValue::Blank), "");
    }

    #[test]
    fn error_renders_code() {
        assert_eq!(normalize(&CellValue::Error("#DIV/0!".into())), "#DIV/0!");
    }

    #[test]
    fn date_serial_renders_as_datetime() {
        // 2024-01-01 is serial 45292 in the 1900 date system
        assert_eq!(
            normalize(&CellValue::DateTime(45292.0)),
            "2024-01-01 00:00:00"
        );
        assert_eq!(
            normalize(&CellValue::DateTime(45292.5)),
            "2024-01-01 12:00:00"
        );
    }

    #[test]
    fn date_serial_out_of_range_falls_back_to_number() {
        let s = normalize(&CellValue::DateTime(1e18));
        assert!(s.starts_with('1'));
    }

    #[test]
    fn normalization_is_deterministic() {
        let v = CellValue::DateTime(45292.25);
        assert_eq!(normalize(&v), normalize(&v));
    }
}
