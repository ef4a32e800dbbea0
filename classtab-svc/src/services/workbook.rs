//! Workbook reading and writing
//!
//! Reading: calamine over the fetched bytes, preferring a sheet named
//! `Sheet1`, else the first sheet, yielding a plain string table for the
//! core pipeline. Writing: rust_xlsxwriter, one header row plus one row per
//! sequenced fact, saved under the static directory with a uuid file name.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use classtab_core::{Dialect, SequencedFactRow};
use rust_xlsxwriter::{Format, Workbook};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Sheet name the source files conventionally use
const PREFERRED_SHEET: &str = "Sheet1";

/// Read spreadsheet bytes into a string table (all rows, headers included).
///
/// Non-string cells are coerced to text; numeric cells that hold integral
/// values (ISBNs) render without a trailing `.0`.
pub fn read_table(bytes: &[u8]) -> ApiResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ApiError::Workbook(e.to_string()))?;

    let sheet_name = if workbook
        .sheet_names()
        .iter()
        .any(|name| name == PREFERRED_SHEET)
    {
        PREFERRED_SHEET.to_string()
    } else {
        workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ApiError::Workbook("Workbook has no sheets".to_string()))?
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ApiError::Workbook(e.to_string()))?;

    tracing::debug!(sheet = %sheet_name, rows = range.height(), "Workbook read");

    Ok(range
        .rows()
        .map(|cells| cells.iter().map(cell_to_string).collect())
        .collect())
}

/// Render one cell as trimmed text
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

/// Write the sequenced rows to a new workbook in `static_dir`.
///
/// Returns the generated file name (uuid-based, prefixed per dialect).
pub fn write_result_workbook(
    static_dir: &Path,
    dialect: Dialect,
    rows: &[SequencedFactRow],
) -> ApiResult<String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, label) in dialect.column_labels().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &header_format)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    for (i, fact) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet
            .write_number(row, 0, fact.sequence_number as f64)
            .and_then(|ws| ws.write_string(row, 1, &fact.canonical_class))
            .and_then(|ws| ws.write_string(row, 2, &fact.isbn))
            .and_then(|ws| ws.write_string(row, 3, &fact.book_name))
            .and_then(|ws| ws.write_string(row, 4, &fact.publisher))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        // Count column stays blank when no headcount was extracted
        if let Some(count) = fact.count {
            worksheet
                .write_number(row, 5, count as f64)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
        }
    }

    let filename = format!("{}{}.xlsx", file_prefix(dialect), Uuid::new_v4());
    let save_path: PathBuf = static_dir.join(&filename);
    workbook
        .save(&save_path)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(path = %save_path.display(), rows = rows.len(), "Result workbook written");
    Ok(filename)
}

fn file_prefix(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Bracketed => "result_",
        Dialect::TrailingSuffix => "winter_hw_",
        Dialect::CompactDash => "compact_",
    }
}
