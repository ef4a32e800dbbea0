//! Data model for the class-list normalization pipeline
//!
//! All values here live for one pipeline invocation; nothing survives across
//! requests.

use serde::Serialize;

/// Input notation for expressing class + headcount in a spreadsheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `24护理1班（45人）` - class text followed by a bracketed headcount
    Bracketed,
    /// `2401班40人` - numeric class code with a trailing headcount suffix
    TrailingSuffix,
    /// `茶艺231-45` - compact major/year/class code with a dash-separated count
    CompactDash,
}

impl Dialect {
    /// Output column labels for this dialect, in fixed semantic order:
    /// sequence number, class, ISBN, book name, publisher, headcount.
    pub fn column_labels(self) -> [&'static str; 6] {
        match self {
            Dialect::Bracketed => ["序号", "班级", "书号", "书名", "出版社", "人数"],
            Dialect::TrailingSuffix => ["编号", "班级", "书号", "教材名称", "出版社", "人数"],
            Dialect::CompactDash => ["编号", "班级", "书号", "教材名称", "出版社", "人数"],
        }
    }
}

/// One source spreadsheet row after column location
#[derive(Debug, Clone, Default)]
pub struct SourceRow {
    /// Raw class-column cell text (None when the cell was empty or missing)
    pub class_cell: Option<String>,
    pub book_name: String,
    pub publisher: String,
    pub isbn: String,
}

/// One parsed class mention inside a class-column cell
///
/// A single cell may yield several entries when multiple classes share one
/// textbook. `count` is None when the matched tier carries no headcount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCountEntry {
    pub raw_class_id: String,
    pub count: Option<u32>,
}

/// One (class, book, publisher, ISBN, count) fact - the deduplication unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub canonical_class: String,
    pub count: Option<u32>,
    pub book_name: String,
    pub publisher: String,
    pub isbn: String,
}

impl FactRow {
    /// Deduplication key: everything except the count. Rows differing only in
    /// count are not separately retained.
    pub fn dedup_key(&self) -> (String, String, String, String) {
        (
            self.canonical_class.clone(),
            self.book_name.clone(),
            self.publisher.clone(),
            self.isbn.clone(),
        )
    }
}

/// A fact row with its class's assigned 1..N sequence number
#[derive(Debug, Clone, Serialize)]
pub struct SequencedFactRow {
    pub sequence_number: u32,
    pub canonical_class: String,
    pub isbn: String,
    pub book_name: String,
    pub publisher: String,
    pub count: Option<u32>,
}
