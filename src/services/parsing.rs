//! Total parsing of individual cells
//!
//! Both parsers always return a value plus an `ok` flag instead of an error:
//! an amount that cannot be read counts as zero, and a date that cannot be
//! read gets its row dropped by the caller. Hand-kept spreadsheets are full
//! of stray text, so neither case may abort a load.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Cell, Money};

/// Currency prefix of the source ledger, always recognized
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Highest Excel serial day (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const ISO_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

const ISO_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

// Two-digit years first: `%Y` would happily read "25" as year 25
const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y",
];

const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y", "%m.%d.%y", "%m.%d.%Y",
];

/// Parse a monetary cell
///
/// Numeric cells are taken as they are. Text cells follow the ledger's
/// locale: an optional leading `-`, an optional currency symbol, `.` as
/// thousands separator and `,` as decimal separator. Amounts whose cents
/// do not fit in [`Money`] fail like any other unreadable value.
pub fn parse_amount(cell: &Cell, symbol: &str) -> (f64, bool) {
    let (value, ok) = match cell {
        Cell::Number(n) => (*n, true),
        Cell::Text(s) => parse_amount_str(s, symbol),
        _ => (0.0, false),
    };
    if ok && Money::try_from_f64(value).is_some() {
        (value, true)
    } else {
        (0.0, false)
    }
}

/// Parse a formatted currency string such as `"R$ 1.234,56"`
pub fn parse_amount_str(raw: &str, symbol: &str) -> (f64, bool) {
    let mut s = raw.trim();

    let negative = match s.strip_prefix('-') {
        Some(rest) => {
            s = rest.trim_start();
            true
        }
        None => false,
    };

    for prefix in [symbol, DEFAULT_CURRENCY_SYMBOL] {
        if prefix.is_empty() {
            continue;
        }
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest;
            break;
        }
    }

    let cleaned = s.replace('.', "").replace(',', ".");
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (if negative { -value } else { value }, true),
        _ => (0.0, false),
    }
}

/// Parse a date cell
///
/// `day_first` decides how ambiguous `01/02/2025`-style text is read.
pub fn parse_date(cell: &Cell, day_first: bool) -> (Option<NaiveDate>, bool) {
    let date = match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => parse_date_str(s, day_first),
        Cell::Empty | Cell::Bool(_) => None,
    };
    (date, date.is_some())
}

/// Parse date text in ISO or locale order
pub fn parse_date_str(raw: &str, day_first: bool) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let iso_like = s.len() >= 4 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    if iso_like {
        return ISO_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(|dt| dt.date())
            .or_else(|| {
                ISO_DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
            });
    }

    let locale_formats: &[&str] = if day_first {
        &DAY_FIRST_FORMATS
    } else {
        &MONTH_FIRST_FORMATS
    };

    locale_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Convert an Excel serial day (1900 date system) to a date
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    // Day 0 is 1899-12-30 once Excel's phantom 1900-02-29 is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
