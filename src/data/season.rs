//! Season keys ("2008-09") with explicit chronological ordering

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An NBA season key.
///
/// Ordering is by start year first, so a timeline built from a set of seasons
/// is chronological no matter how the keys were collected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Season {
    label: String,
    start_year: u16,
}

impl Season {
    /// Parse a key like "2008-09". The start year comes from the leading
    /// four digits; keys without one are rejected.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        let year_digits = label.get(..4)?;
        if !year_digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let start_year = year_digits.parse().ok()?;
        Some(Self {
            label: label.to_string(),
            start_year,
        })
    }

    /// Season starting in the given year: 2008 -> "2008-09", 1999 -> "1999-00"
    pub fn from_start_year(start_year: u16) -> Self {
        let end = (start_year as u32 + 1) % 100;
        Self {
            label: format!("{}-{:02}", start_year, end),
            start_year,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_year(&self) -> u16 {
        self.start_year
    }
}

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_year
            .cmp(&other.start_year)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label)
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Season::parse(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid season key '{}'", label)))
    }
}

/// Every season from `first_start` through `last_start` inclusive, in order.
/// This is the range the stats fetch scripts walk.
pub fn season_range(first_start: u16, last_start: u16) -> Vec<Season> {
    (first_start..=last_start)
        .map(Season::from_start_year)
        .collect()
}

/// Distinct seasons sorted chronologically
pub fn ordered_seasons<'a>(seasons: impl IntoIterator<Item = &'a Season>) -> Vec<Season> {
    let mut out: Vec<Season> = seasons.into_iter().cloned().collect();
    out.sort();
    out.dedup();
    out
}
