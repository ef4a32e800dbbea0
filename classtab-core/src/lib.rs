//! classtab-core - multi-dialect class-string normalization pipeline
//!
//! Turns free-form "class" cells from textbook-order spreadsheets into
//! structured, deduplicated, sequence-numbered (class, book, count) facts.
//! Three fixed input dialects share one pipeline shape: parse a cell through
//! an ordered chain of pattern tiers, canonicalize the class ids, expand
//! against the row's book fields, then sort, dedupe and number.
//!
//! The crate is pure and synchronous; fetching, workbook I/O and transport
//! live in `classtab-svc`.

pub mod canonical;
pub mod columns;
pub mod dialect;
pub mod error;
pub mod order;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use crate::error::{Error, Result};
pub use crate::types::{ClassCountEntry, Dialect, FactRow, SequencedFactRow, SourceRow};

use crate::columns::rows_from_table;
use crate::dialect::DialectConfig;

/// Run the whole pipeline over a raw string table (header rows included).
///
/// Locates the semantic columns, then parses, canonicalizes, expands,
/// dedupes and numbers per the dialect's configuration.
pub fn process_table(table: &[Vec<String>], dialect: Dialect) -> Result<Vec<SequencedFactRow>> {
    let config = DialectConfig::for_dialect(dialect);
    let (map, rows) = rows_from_table(table)?;
    tracing::debug!(
        ?dialect,
        class_col = map.class_col,
        book_col = map.book_col,
        rows = rows.len(),
        "columns located"
    );
    pipeline::run(&rows, &config)
}
