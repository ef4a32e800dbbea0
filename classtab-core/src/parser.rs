//! Dialect parser: tier-chain driver
//!
//! Extracts (class id, headcount) entries from one raw class-column cell.
//! Tiers run in declaration order; fallback tiers are skipped once any entry
//! exists, union tiers always run. Every tier deduplicates by resulting class
//! id, which also implements the union policy's "only add unseen classes"
//! rule. Malformed input never fails - it just matches fewer or zero entries.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::dialect::{DialectConfig, TierPolicy, TierShape};
use crate::types::ClassCountEntry;

// Parenthetical content in either bracket convention, e.g. `(试点)` notes
// appended to compact codes.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"（[^）]*）|\([^)]*\)").unwrap());

/// Separator punctuation trimmed from the ends of a pre-normalized cell
const EDGE_SEPARATORS: &[char] = &['-', '、', '，', ',', '.', '。', ';', '；'];

/// Parse one class-column cell into its class/count entries.
///
/// Returns an empty vector for cells no tier matches; the caller drops such
/// rows silently.
pub fn parse_cell(raw_cell: &str, config: &DialectConfig) -> Vec<ClassCountEntry> {
    let cell = if config.pre_normalize {
        pre_normalize(raw_cell)
    } else {
        raw_cell.to_string()
    };

    if cell.trim().is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<ClassCountEntry> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for tier in config.tiers {
        if tier.policy == TierPolicy::Fallback && !entries.is_empty() {
            continue;
        }
        for caps in tier.pattern.captures_iter(&cell) {
            if let Some(entry) = entry_from_captures(&caps, tier.shape, config) {
                if seen.insert(entry.raw_class_id.clone()) {
                    entries.push(entry);
                }
            }
        }
    }

    entries
}

/// Build one entry from a tier match, per the tier's capture shape
fn entry_from_captures(
    caps: &Captures<'_>,
    shape: TierShape,
    config: &DialectConfig,
) -> Option<ClassCountEntry> {
    match shape {
        TierShape::ClassCount => {
            let class = caps.name("class")?.as_str().to_string();
            // A count capture that does not fit u32 is treated as a miss
            let count = caps.name("count")?.as_str().parse::<u32>().ok()?;
            Some(ClassCountEntry {
                raw_class_id: class,
                count: Some(count),
            })
        }
        TierShape::CompactCode => {
            let year = caps.name("year")?.as_str();
            let class_number = caps.name("class")?.as_str();
            let major = match caps.name("major") {
                Some(m) if !m.as_str().is_empty() => m.as_str(),
                _ => config.default_major,
            };
            let count = match caps.name("count") {
                Some(c) => Some(c.as_str().parse::<u32>().ok()?),
                None => None,
            };
            Some(ClassCountEntry {
                raw_class_id: format!("{year}{major}{class_number}"),
                count,
            })
        }
    }
}

/// Strip parenthetical content and trim stray separator punctuation
fn pre_normalize(raw: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(raw, "");
    stripped
        .trim()
        .trim_matches(|c: char| EDGE_SEPARATORS.contains(&c) || c.is_whitespace())
        .to_string()
}
