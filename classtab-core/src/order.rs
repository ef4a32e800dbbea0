//! Dialect-specific ordering and sequence numbering

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Dialect;

static LEADING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}").unwrap());
static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Sentinel sort key for compact ids with no leading two-digit year; such ids
/// sort after every real cohort
const COMPACT_KEY_SENTINEL: i64 = i64::MAX;

/// Compare two canonical class ids under a dialect's sort order
pub fn compare_classes(a: &str, b: &str, dialect: Dialect) -> Ordering {
    match dialect {
        // Newest cohort years first, lexicographic within a year
        Dialect::Bracketed => {
            let (year_a, rest_a) = split_year(a);
            let (year_b, rest_b) = split_year(b);
            year_b.cmp(&year_a).then_with(|| rest_a.cmp(&rest_b))
        }
        Dialect::TrailingSuffix => numeric_class_value(a).cmp(&numeric_class_value(b)),
        Dialect::CompactDash => compact_sort_key(a).cmp(&compact_sort_key(b)),
    }
}

/// Whether a canonical id survives the dialect's data-quality filter.
///
/// Only the trailing-suffix dialect filters: ids whose 班-stripped remainder
/// is not purely numeric are dropped from the output entirely.
pub fn class_passes_filter(canonical_class: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::TrailingSuffix => numeric_class_value(canonical_class).is_some(),
        Dialect::Bracketed | Dialect::CompactDash => true,
    }
}

/// Assign 1..N to classes in their given (already sorted) order
pub fn assign_sequence(sorted_unique_classes: &[String]) -> HashMap<String, u32> {
    sorted_unique_classes
        .iter()
        .enumerate()
        .map(|(i, class)| (class.clone(), i as u32 + 1))
        .collect()
}

/// First two characters as the cohort year, remainder as the tie-break text
fn split_year(canonical_class: &str) -> (String, String) {
    let mut chars = canonical_class.chars();
    let year: String = chars.by_ref().take(2).collect();
    (year, chars.collect())
}

/// Numeric value of a `<digits>班` id, None when the remainder is not numeric
fn numeric_class_value(canonical_class: &str) -> Option<i64> {
    canonical_class
        .strip_suffix('班')
        .unwrap_or(canonical_class)
        .parse::<i64>()
        .ok()
}

/// Compact sort key: cohort year * 100 + trailing class number
fn compact_sort_key(canonical_class: &str) -> i64 {
    let Some(year) = LEADING_YEAR.find(canonical_class) else {
        return COMPACT_KEY_SENTINEL;
    };
    // Leading year parse cannot fail, the pattern is two ASCII digits
    let year: i64 = year.as_str().parse().unwrap_or(0);
    let class_number = TRAILING_DIGITS
        .captures(canonical_class)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0);
    year * 100 + class_number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_orders_year_desc_then_rest_asc() {
        let mut classes = vec![
            "24护理2班".to_string(),
            "25会计1班".to_string(),
            "24护理1班".to_string(),
        ];
        classes.sort_by(|a, b| compare_classes(a, b, Dialect::Bracketed));
        assert_eq!(classes, vec!["25会计1班", "24护理1班", "24护理2班"]);
    }

    #[test]
    fn suffix_orders_numerically() {
        let mut classes = vec![
            "2410班".to_string(),
            "2402班".to_string(),
            "2401班".to_string(),
        ];
        classes.sort_by(|a, b| compare_classes(a, b, Dialect::TrailingSuffix));
        assert_eq!(classes, vec!["2401班", "2402班", "2410班"]);
    }

    #[test]
    fn suffix_filter_drops_non_numeric_remainder() {
        assert!(class_passes_filter("2401班", Dialect::TrailingSuffix));
        assert!(!class_passes_filter("贸易班", Dialect::TrailingSuffix));
        assert!(class_passes_filter("贸易班", Dialect::Bracketed));
    }

    #[test]
    fn compact_key_is_year_times_100_plus_class() {
        assert_eq!(compact_sort_key("23茶艺1"), 2301);
        assert_eq!(compact_sort_key("25电11"), 2511);
        assert_eq!(compact_sort_key("无年份"), COMPACT_KEY_SENTINEL);
    }

    #[test]
    fn compact_ids_without_year_sort_last() {
        let mut classes = vec![
            "无年份".to_string(),
            "25电1".to_string(),
            "23茶艺1".to_string(),
        ];
        classes.sort_by(|a, b| compare_classes(a, b, Dialect::CompactDash));
        assert_eq!(classes, vec!["23茶艺1", "25电1", "无年份"]);
    }

    #[test]
    fn sequence_is_bijective_over_sorted_order() {
        let classes = vec![
            "2401班".to_string(),
            "2402班".to_string(),
            "2410班".to_string(),
        ];
        let numbers = assign_sequence(&classes);
        assert_eq!(numbers.len(), 3);
        assert_eq!(numbers["2401班"], 1);
        assert_eq!(numbers["2402班"], 2);
        assert_eq!(numbers["2410班"], 3);
    }
}
