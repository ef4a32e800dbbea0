//! Canonicalization of raw class identifiers
//!
//! Maps the class ids a dialect parser emits onto one canonical spelling so
//! that notational variants of the same real class merge. Total and
//! idempotent: unrecognized shapes pass through verbatim, and canonical ids
//! canonicalize to themselves.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Dialect;

// Class text for the 24/25 cohorts, without brackets or whitespace
static COHORT_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"2[45][^（）\s]+").unwrap());

/// Grade marker separating the cohort year from the major in long-form ids
/// (`24级护理1班` vs the canonical `24护理1班`)
const GRADE_MARKER: char = '级';

/// Canonicalize one raw class id for the given dialect.
///
/// The trailing-suffix dialect's ids (`<digits>班`) are already canonical and
/// the compact dialect constructs canonical ids during parsing, so only the
/// bracketed dialect transforms anything here.
pub fn canonicalize(raw_class_id: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Bracketed => canonicalize_bracketed(raw_class_id),
        Dialect::TrailingSuffix | Dialect::CompactDash => raw_class_id.to_string(),
    }
}

fn canonicalize_bracketed(raw: &str) -> String {
    // Stray bracket content survived parsing: re-extract the class text
    if raw.contains('（') || raw.contains('）') {
        if let Some(m) = COHORT_CLASS.find(raw) {
            return m.as_str().to_string();
        }
    }

    // Long form with the grade marker: drop it so `24级护理1班` and
    // `24护理1班` merge
    if raw.contains(GRADE_MARKER) && (raw.starts_with("24") || raw.starts_with("25")) {
        let mut chars = raw.chars();
        let year: String = chars.by_ref().take(2).collect();
        let remainder: String = chars.collect();
        let remainder = remainder.strip_prefix(GRADE_MARKER).unwrap_or(&remainder);
        return format!("{year}{remainder}");
    }

    raw.to_string()
}
