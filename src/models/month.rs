//! Calendar month keys and month labels
//!
//! Periods are always grouped and ordered by the numeric `(year, month)` pair.
//! Labels are a presentation concern and come from fixed tables, never from
//! the host locale.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, ordered by year then month number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMonthKey")]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

#[derive(Deserialize)]
struct RawMonthKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthKey> for MonthKey {
    type Error = MonthParseError;

    fn try_from(raw: RawMonthKey) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month).ok_or(MonthParseError::InvalidMonth(raw.month))
    }
}

impl MonthKey {
    /// Create a month key, rejecting month numbers outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month from the local clock
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a month key
    ///
    /// Formats:
    /// - "2025-01"
    /// - "01/2025"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        let (year, month) = if let Some((year, month)) = s.split_once('-') {
            (year, month)
        } else if let Some((month, year)) = s.split_once('/') {
            (year, month)
        } else {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        };

        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: {} (expected YYYY-MM)", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

const PT_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const EN_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const PT_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const EN_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Which fixed table month labels are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthLabels {
    /// jan, fev, mar, ...
    #[default]
    #[serde(alias = "pt")]
    Portuguese,
    /// jan, feb, mar, ...
    #[serde(alias = "en")]
    English,
}

impl MonthLabels {
    /// Lowercase three-letter label for a month number (1-12)
    ///
    /// Out-of-range numbers yield "?".
    pub fn label(&self, month: u32) -> &'static str {
        let table = match self {
            Self::Portuguese => &PT_ABBREVIATIONS,
            Self::English => &EN_ABBREVIATIONS,
        };
        month
            .checked_sub(1)
            .and_then(|idx| table.get(idx as usize))
            .copied()
            .unwrap_or("?")
    }

    /// Whether a text cell looks like a month label in any known table
    ///
    /// Used to tell a leaked month column apart from descriptions.
    pub fn is_month_label(text: &str) -> bool {
        let text = text.trim().to_lowercase();
        let text = text.trim_end_matches('.');
        [PT_ABBREVIATIONS, EN_ABBREVIATIONS, PT_NAMES, EN_NAMES]
            .iter()
            .any(|table| table.contains(&text))
    }
}

impl std::str::FromStr for MonthLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Ok(Self::Portuguese),
            "en" | "english" => Ok(Self::English),
            other => Err(format!("unknown month label table: {}", other)),
        }
    }
}
