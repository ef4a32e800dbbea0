//! Pipeline driver: expand, filter, sort, dedupe, number
//!
//! One request-scoped pass over the located source rows. Pure and
//! synchronous; every invocation operates on its own data.

use std::collections::{HashMap, HashSet};

use crate::canonical::canonicalize;
use crate::dialect::DialectConfig;
use crate::error::{Error, Result};
use crate::order::{assign_sequence, class_passes_filter, compare_classes};
use crate::parser::parse_cell;
use crate::types::{FactRow, SequencedFactRow, SourceRow};

/// Cross-product one source row's class entries with its book fields
pub fn expand_row(row: &SourceRow, config: &DialectConfig) -> Vec<FactRow> {
    let Some(cell) = row.class_cell.as_deref() else {
        return Vec::new();
    };
    parse_cell(cell, config)
        .into_iter()
        .map(|entry| FactRow {
            canonical_class: canonicalize(&entry.raw_class_id, config.dialect),
            count: entry.count,
            book_name: row.book_name.clone(),
            publisher: row.publisher.clone(),
            isbn: row.isbn.clone(),
        })
        .collect()
}

/// Run the full pipeline for one dialect over located source rows.
///
/// Returns rows ordered by the dialect's class sort order, deduplicated on
/// (class, book, publisher, ISBN) with first occurrence retained, each
/// carrying its class's 1..N sequence number.
pub fn run(rows: &[SourceRow], config: &DialectConfig) -> Result<Vec<SequencedFactRow>> {
    let mut facts: Vec<FactRow> = rows
        .iter()
        .flat_map(|row| expand_row(row, config))
        .filter(|fact| class_passes_filter(&fact.canonical_class, config.dialect))
        .collect();

    if facts.is_empty() {
        return Err(Error::NoValidData);
    }

    // Stable sort by class only: facts of one class keep their input order,
    // so post-sort "first occurrence" is deterministic
    facts.sort_by(|a, b| compare_classes(&a.canonical_class, &b.canonical_class, config.dialect));

    let mut seen = HashSet::new();
    facts.retain(|fact| seen.insert(fact.dedup_key()));

    let mut sorted_classes: Vec<String> = Vec::new();
    for fact in &facts {
        if sorted_classes.last() != Some(&fact.canonical_class) {
            sorted_classes.push(fact.canonical_class.clone());
        }
    }
    let numbers: HashMap<String, u32> = assign_sequence(&sorted_classes);

    tracing::debug!(
        facts = facts.len(),
        classes = sorted_classes.len(),
        "pipeline complete"
    );

    Ok(facts
        .into_iter()
        .map(|fact| {
            let sequence_number = numbers[&fact.canonical_class];
            SequencedFactRow {
                sequence_number,
                canonical_class: fact.canonical_class,
                isbn: fact.isbn,
                book_name: fact.book_name,
                publisher: fact.publisher,
                count: fact.count,
            }
        })
        .collect())
}
