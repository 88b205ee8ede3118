//! Numeric display formatting
//!
//! Pure functions; the locale is passed on every call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Digit-grouping convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    /// en-IN: last three digits, then groups of two (12,34,567)
    #[default]
    Indian,
    /// en-US: groups of three (1,234,567)
    International,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Indian => "en-IN",
            Locale::International => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-in" | "indian" => Ok(Locale::Indian),
            "en-us" | "en-gb" | "international" => Ok(Locale::International),
            other => Err(format!("unsupported locale '{}' (use en-IN or en-US)", other)),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

/// Render an integer with the locale's digit grouping
pub fn format_number(n: impl Into<i128>, locale: Locale) -> String {
    let n: i128 = n.into();
    let digits = n.unsigned_abs().to_string();

    let grouped = match locale {
        Locale::International => group_from_right(&digits, 3, 3),
        Locale::Indian => group_from_right(&digits, 3, 2),
    };

    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Split `digits` into a trailing group of `first` digits, then groups of `rest`
fn group_from_right(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups: Vec<&str> = vec![tail];
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(rest);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(",")
}

/// Severity score with two decimals (0.91)
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Integer percentage with a trailing sign (74%)
pub fn format_percent(value: i64) -> String {
    format!("{}%", value)
}
