//! Terminal kinds and the fixed unit vocabulary.
//!
//! `TokenKind` enumerates every terminal the catalog can produce. `Unit`
//! covers the eight duration units together with the fixed calendar
//! conventions (a year is 365 days, a month 30 days, a week 7 days) used to
//! convert between units.

use phf::phf_map;

/// Every terminal the lexer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[expect(non_camel_case_types, reason = "token naming mirrors grammar notation")]
pub enum TokenKind {
    T_NUMBER,
    T_UNIT,
    T_DATETIME_LITERAL,
    T_DATE_LITERAL,
    T_ISO8601,
    T_DATE,
    T_TIME,
    T_COMMA,
    T_LPAREN,
    T_RPAREN,
    T_MINUS,
    T_PLUS,
    T_STAR,
    T_SLASH,
    T_WHITESPACE,
}

impl TokenKind {
    /// Human-readable description used in error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::T_NUMBER => "number",
            Self::T_UNIT => "unit",
            Self::T_DATETIME_LITERAL => "datetime literal",
            Self::T_DATE_LITERAL => "date literal",
            Self::T_ISO8601 => "ISO 8601 datetime",
            Self::T_DATE => "date",
            Self::T_TIME => "time",
            Self::T_COMMA => "','",
            Self::T_LPAREN => "'('",
            Self::T_RPAREN => "')'",
            Self::T_MINUS => "'-'",
            Self::T_PLUS => "'+'",
            Self::T_STAR => "'*'",
            Self::T_SLASH => "'/'",
            Self::T_WHITESPACE => "whitespace",
        }
    }
}

/// Duration units, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Catalog capture group name to unit.
static UNIT_GROUPS: phf::Map<&'static str, Unit> = phf_map! {
    "years" => Unit::Year,
    "months" => Unit::Month,
    "weeks" => Unit::Week,
    "days" => Unit::Day,
    "hours" => Unit::Hour,
    "minutes" => Unit::Minute,
    "seconds" => Unit::Second,
    "milliseconds" => Unit::Millisecond,
};

impl Unit {
    /// All units in breakdown order.
    pub const ALL: [Self; 8] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    /// Resolve the unit named by a catalog capture group.
    #[must_use]
    pub fn from_group(name: &str) -> Option<Self> {
        UNIT_GROUPS.get(name).copied()
    }

    /// Length of one unit in microseconds under the fixed conventions.
    #[must_use]
    pub const fn micros(self) -> i64 {
        const SECOND: i64 = 1_000_000;
        const DAY: i64 = 86_400 * SECOND;
        match self {
            Self::Year => 365 * DAY,
            Self::Month => 30 * DAY,
            Self::Week => 7 * DAY,
            Self::Day => DAY,
            Self::Hour => 3_600 * SECOND,
            Self::Minute => 60 * SECOND,
            Self::Second => SECOND,
            Self::Millisecond => 1_000,
        }
    }

    /// Singular display name.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Plural display name.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Year => "years",
            Self::Month => "months",
            Self::Week => "weeks",
            Self::Day => "days",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
            Self::Millisecond => "milliseconds",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.plural())
    }
}

/// Keywords accepted by the `T_DATETIME_LITERAL` and `T_DATE_LITERAL`
/// terminals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Now,
    Epoch,
    Today,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "now" => Keyword::Now,
    "epoch" => Keyword::Epoch,
    "today" => Keyword::Today,
};

impl Keyword {
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        KEYWORDS.get(text).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_ordered_largest_first() {
        let sizes: Vec<i64> = Unit::ALL.iter().map(|u| u.micros()).collect();
        assert!(sizes.windows(2).all(|w| matches!(w, [a, b] if a > b)));
    }

    #[test]
    fn group_names_resolve_to_units() {
        assert_eq!(Unit::from_group("weeks"), Some(Unit::Week));
        assert_eq!(Unit::from_group("fortnights"), None);
    }
}
