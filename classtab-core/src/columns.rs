//! Column location by header keyword matching
//!
//! Source workbooks label the four semantic columns inconsistently; the
//! locator scans candidate header rows for cells containing a known keyword
//! per field. Class and book columns are required; publisher and ISBN are
//! filled with empty text when absent.

use crate::error::{Error, Result};
use crate::types::SourceRow;

/// How many leading rows may precede the real header (title rows, decorative
/// rows) before location gives up
const HEADER_SCAN_ROWS: usize = 5;

const CLASS_KEYWORDS: &[&str] = &["使用班级", "班级", "class"];
const BOOK_KEYWORDS: &[&str] = &["教材名称", "书名", "教材", "book"];
const PUBLISHER_KEYWORDS: &[&str] = &["出版社", "publisher"];
const ISBN_KEYWORDS: &[&str] = &["书号", "isbn"];

/// Resolved column indices for one workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub class_col: usize,
    pub book_col: usize,
    pub publisher_col: Option<usize>,
    pub isbn_col: Option<usize>,
}

impl ColumnMap {
    /// Locate the semantic columns in one header row.
    ///
    /// Fails when the class or book column cannot be resolved; the pipeline
    /// must not run on a workbook whose required columns are unknown.
    pub fn locate(headers: &[String]) -> Result<Self> {
        let class_col =
            find_column(headers, CLASS_KEYWORDS).ok_or(Error::MissingColumn("使用班级"))?;
        let book_col =
            find_column(headers, BOOK_KEYWORDS).ok_or(Error::MissingColumn("教材名称"))?;
        Ok(Self {
            class_col,
            book_col,
            publisher_col: find_column(headers, PUBLISHER_KEYWORDS),
            isbn_col: find_column(headers, ISBN_KEYWORDS),
        })
    }
}

/// Locate the header row within the first few rows of a string table and
/// convert the rows after it into source rows.
///
/// Rows between a title row and the header, or secondary header rows below
/// it, contain no parseable class text and drop out downstream.
pub fn rows_from_table(table: &[Vec<String>]) -> Result<(ColumnMap, Vec<SourceRow>)> {
    let mut last_err = Error::MissingColumn("使用班级");
    for (header_idx, row) in table.iter().take(HEADER_SCAN_ROWS).enumerate() {
        match ColumnMap::locate(row) {
            Ok(map) => {
                let rows = table[header_idx + 1..]
                    .iter()
                    .map(|cells| source_row(cells, &map))
                    .collect();
                return Ok((map, rows));
            }
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

fn source_row(cells: &[String], map: &ColumnMap) -> SourceRow {
    let cell = |idx: usize| cells.get(idx).map(|s| s.trim().to_string());
    SourceRow {
        class_cell: cell(map.class_col).filter(|s| !s.is_empty()),
        book_name: cell(map.book_col).unwrap_or_default(),
        publisher: map
            .publisher_col
            .and_then(cell)
            .unwrap_or_default(),
        isbn: map.isbn_col.and_then(cell).unwrap_or_default(),
    }
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim().to_lowercase();
        keywords.iter().any(|kw| header.contains(kw))
    })
}
