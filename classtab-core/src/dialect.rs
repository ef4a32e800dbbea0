//! Dialect configurations
//!
//! Each input dialect is an ordered list of pattern tiers. The parser driver
//! walks the tiers in order; a tier's policy says whether it only runs when
//! nothing matched yet (fallback) or always runs and merges new class ids
//! (union). Keeping the chains as data means the three endpoints share one
//! pipeline instead of three near-duplicate code paths.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Dialect;

/// Major label substituted when a compact-dash code omits its ideograph run
/// (e.g. `251` is read as class 1 of the 25 cohort in the default major).
pub const DEFAULT_COMPACT_MAJOR: &str = "电";

/// How a tier's matches combine with earlier tiers' results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierPolicy {
    /// Only consulted when no earlier tier produced any entry
    Fallback,
    /// Always consulted; adds entries whose class id is not already present
    Union,
}

/// Which capture groups a tier's pattern exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierShape {
    /// `class` and `count` captures; the class text is taken verbatim
    ClassCount,
    /// `major` (possibly empty/absent), `year`, `class` and optional `count`
    /// captures; the class id is assembled as `year + major + class`
    CompactCode,
}

/// One pattern tier of a dialect's chain
pub struct PatternTier {
    pub pattern: &'static Lazy<Regex>,
    pub policy: TierPolicy,
    pub shape: TierShape,
}

/// Fixed configuration for one input dialect
pub struct DialectConfig {
    pub dialect: Dialect,
    pub tiers: &'static [PatternTier],
    /// Substituted for an absent ideograph run in compact-code tiers
    pub default_major: &'static str,
    /// Strip parenthetical content and trim stray separator punctuation from
    /// the cell before matching
    pub pre_normalize: bool,
}

// Bracketed-headcount dialect: class text followed by a full-width bracketed
// count, with or without the 人 counter word.
static BRACKETED_WITH_REN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<class>\d{2}[^（\s]+?)（(?P<count>\d+)人?）").unwrap());
static BRACKETED_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<class>\d{2}[^（\s]+?)（(?P<count>\d+)）").unwrap());

// Trailing-headcount-suffix dialect: numeric class code ending in 班, count
// after optional whitespace, 人 suffix optional in the fallback tier.
static SUFFIX_WITH_REN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<class>\d+班)\s*(?P<count>\d+)人").unwrap());
static SUFFIX_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<class>\d+班)\s*(?P<count>\d+)").unwrap());

// Compact-dash dialect: optional major ideographs, two-digit cohort year,
// class number, optional dash-separated count.
static COMPACT_FULL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<major>\p{Han}+)(?P<year>\d{2})(?P<class>\d+)(?:-(?P<count>\d+))?").unwrap()
});
static COMPACT_OPTIONAL_MAJOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<major>\p{Han}*)(?P<year>\d{2})(?P<class>\d+)(?:-(?P<count>\d+))?").unwrap()
});
static COMPACT_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<year>\d{2})(?P<class>\d{2,})(?:-(?P<count>\d+))?").unwrap());
static COMPACT_THREE_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<year>\d{2})(?P<class>\d)(?:-(?P<count>\d+))?").unwrap());

static BRACKETED_TIERS: [PatternTier; 2] = [
    PatternTier {
        pattern: &BRACKETED_WITH_REN,
        policy: TierPolicy::Fallback,
        shape: TierShape::ClassCount,
    },
    // Unioned, not a fallback: guards against the same class appearing in
    // both bracket styles within one cell.
    PatternTier {
        pattern: &BRACKETED_BARE,
        policy: TierPolicy::Union,
        shape: TierShape::ClassCount,
    },
];

static SUFFIX_TIERS: [PatternTier; 2] = [
    PatternTier {
        pattern: &SUFFIX_WITH_REN,
        policy: TierPolicy::Fallback,
        shape: TierShape::ClassCount,
    },
    PatternTier {
        pattern: &SUFFIX_BARE,
        policy: TierPolicy::Fallback,
        shape: TierShape::ClassCount,
    },
];

static COMPACT_TIERS: [PatternTier; 4] = [
    PatternTier {
        pattern: &COMPACT_FULL,
        policy: TierPolicy::Fallback,
        shape: TierShape::CompactCode,
    },
    PatternTier {
        pattern: &COMPACT_OPTIONAL_MAJOR,
        policy: TierPolicy::Fallback,
        shape: TierShape::CompactCode,
    },
    PatternTier {
        pattern: &COMPACT_NUMERIC,
        policy: TierPolicy::Fallback,
        shape: TierShape::CompactCode,
    },
    PatternTier {
        pattern: &COMPACT_THREE_DIGIT,
        policy: TierPolicy::Fallback,
        shape: TierShape::CompactCode,
    },
];

impl DialectConfig {
    /// Configuration for strings like `24护理1班（45人）`
    pub fn bracketed() -> Self {
        Self {
            dialect: Dialect::Bracketed,
            tiers: &BRACKETED_TIERS,
            default_major: "",
            pre_normalize: false,
        }
    }

    /// Configuration for strings like `2401班40人` / `2401班40`
    pub fn trailing_suffix() -> Self {
        Self {
            dialect: Dialect::TrailingSuffix,
            tiers: &SUFFIX_TIERS,
            default_major: "",
            pre_normalize: false,
        }
    }

    /// Configuration for strings like `茶艺231-45`, `电251-45`, `231-45`, `251`
    pub fn compact_dash() -> Self {
        Self {
            dialect: Dialect::CompactDash,
            tiers: &COMPACT_TIERS,
            default_major: DEFAULT_COMPACT_MAJOR,
            pre_normalize: true,
        }
    }

    /// The configuration for a dialect tag
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Bracketed => Self::bracketed(),
            Dialect::TrailingSuffix => Self::trailing_suffix(),
            Dialect::CompactDash => Self::compact_dash(),
        }
    }
}
