//! Monthly aggregates of the two transaction streams

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::money::Money;
use super::month::{MonthKey, MonthLabels};

/// One (year, month) bucket with income and expense totals
///
/// The balance is always derived from the two totals and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month_number: u32,
    pub month_label: String,
    pub income_total: Money,
    pub expense_total: Money,
}

impl Period {
    /// Create a period for a month with the given totals
    pub fn new(key: MonthKey, income_total: Money, expense_total: Money, labels: MonthLabels) -> Self {
        Self {
            year: key.year,
            month_number: key.month,
            month_label: labels.label(key.month).to_string(),
            income_total,
            expense_total,
        }
    }

    /// A period with no activity on either side
    pub fn empty(key: MonthKey, labels: MonthLabels) -> Self {
        Self::new(key, Money::zero(), Money::zero(), labels)
    }

    pub fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month_number,
        }
    }

    /// `income_total - expense_total`
    pub fn balance(&self) -> Money {
        self.income_total - self.expense_total
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Period", 6)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month_number", &self.month_number)?;
        state.serialize_field("month_label", &self.month_label)?;
        state.serialize_field("income_total", &self.income_total)?;
        state.serialize_field("expense_total", &self.expense_total)?;
        state.serialize_field("balance", &self.balance())?;
        state.end()
    }
}

/// Income and expense totals over some set of periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    pub fn add_period(&mut self, period: &Period) {
        self.income += period.income_total;
        self.expense += period.expense_total;
    }
}

impl<'a> FromIterator<&'a Period> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Period>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for period in iter {
            totals.add_period(period);
        }
        totals
    }
}

impl Serialize for Totals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Totals", 3)?;
        state.serialize_field("income", &self.income)?;
        state.serialize_field("expense", &self.expense)?;
        state.serialize_field("balance", &self.balance())?;
        state.end()
    }
}

/// Totals for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTotals {
    pub year: i32,
    pub totals: Totals,
}

impl Serialize for YearTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("YearTotals", 4)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("income", &self.totals.income)?;
        state.serialize_field("expense", &self.totals.expense)?;
        state.serialize_field("balance", &self.totals.balance())?;
        state.end()
    }
}
