//! Monthly aggregation
//!
//! Groups both transaction streams by `(year, month)`, merges them with
//! outer-join semantics and keeps the result in numeric chronological order.

use std::collections::BTreeMap;

use crate::models::{
    Money, MonthKey, MonthLabels, Period, Totals, Transaction, YearTotals,
};

/// Stateless aggregation over normalized transactions
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyAggregator {
    labels: MonthLabels,
}

impl MonthlyAggregator {
    pub fn new(labels: MonthLabels) -> Self {
        Self { labels }
    }

    /// Sum of amounts per month
    pub fn group_by_month(transactions: &[Transaction]) -> BTreeMap<MonthKey, Money> {
        let mut groups: BTreeMap<MonthKey, Money> = BTreeMap::new();
        for txn in transactions {
            *groups.entry(txn.key()).or_default() += txn.amount;
        }
        groups
    }

    /// Merge both streams into one period per month present in either
    ///
    /// A month missing from one stream gets zero on that side. The result is
    /// ordered by `(year, month)`; both streams empty yields an empty table.
    pub fn merge(&self, income: &[Transaction], expense: &[Transaction]) -> Vec<Period> {
        let income_groups = Self::group_by_month(income);
        let expense_groups = Self::group_by_month(expense);

        let mut merged: BTreeMap<MonthKey, (Money, Money)> = BTreeMap::new();
        for (key, total) in income_groups {
            merged.entry(key).or_default().0 = total;
        }
        for (key, total) in expense_groups {
            merged.entry(key).or_default().1 = total;
        }

        merged
            .into_iter()
            .map(|(key, (income_total, expense_total))| {
                Period::new(key, income_total, expense_total, self.labels)
            })
            .collect()
    }

    /// Periods from `reference` onward, in chronological order
    ///
    /// With `include_current` the reference month itself is part of the
    /// window (`>=`); otherwise the window starts after it (`>`).
    pub fn remaining_window(
        periods: &[Period],
        reference: MonthKey,
        include_current: bool,
    ) -> Vec<Period> {
        let mut window: Vec<Period> = periods
            .iter()
            .filter(|p| {
                if include_current {
                    p.key() >= reference
                } else {
                    p.key() > reference
                }
            })
            .cloned()
            .collect();
        window.sort_by_key(Period::key);
        window
    }

    /// Transactions of one month, by date then by source row
    pub fn transactions_in(transactions: &[Transaction], key: MonthKey) -> Vec<&Transaction> {
        let mut selected: Vec<&Transaction> =
            transactions.iter().filter(|t| t.key() == key).collect();
        selected.sort_by_key(|t| (t.date, t.row));
        selected
    }

    /// Income/expense totals per calendar year, oldest first
    pub fn year_totals(periods: &[Period]) -> Vec<YearTotals> {
        let mut years: BTreeMap<i32, Totals> = BTreeMap::new();
        for period in periods {
            years.entry(period.year).or_default().add_period(period);
        }
        years
            .into_iter()
            .map(|(year, totals)| YearTotals { year, totals })
            .collect()
    }

    /// Grand totals over all periods
    pub fn totals(periods: &[Period]) -> Totals {
        periods.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, date: (i32, u32, u32), cents: i64, row: usize) -> Transaction {
        Transaction::new(
            kind,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "entry",
            Money::from_cents(cents),
            row,
            MonthLabels::Portuguese,
        )
    }

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    fn periods_for(keys: &[(i32, u32)]) -> Vec<Period> {
        keys.iter()
            .map(|&(y, m)| Period::empty(key(y, m), MonthLabels::Portuguese))
            .collect()
    }

    #[test]
    fn test_salary_and_rent_scenario() {
        let income = vec![
            txn(TransactionKind::Income, (2025, 1, 5), 150_000, 1),
            txn(TransactionKind::Income, (2025, 2, 1), 150_000, 2),
        ];
        let expense = vec![txn(TransactionKind::Expense, (2025, 1, 10), 80_000, 1)];

        let periods = MonthlyAggregator::new(MonthLabels::Portuguese).merge(&income, &expense);

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].key(), key(2025, 1));
        assert_eq!(periods[0].income_total, Money::from_cents(150_000));
        assert_eq!(periods[0].expense_total, Money::from_cents(80_000));
        assert_eq!(periods[0].balance(), Money::from_cents(70_000));
        assert_eq!(periods[1].key(), key(2025, 2));
        assert_eq!(periods[1].income_total, Money::from_cents(150_000));
        assert_eq!(periods[1].expense_total, Money::zero());
        assert_eq!(periods[1].balance(), Money::from_cents(150_000));
    }

    #[test]
    fn test_outer_join_keeps_expense_only_months() {
        let income = vec![txn(TransactionKind::Income, (2025, 3, 1), 100, 1)];
        let expense = vec![
            txn(TransactionKind::Expense, (2025, 4, 2), 40, 1),
            txn(TransactionKind::Expense, (2025, 4, 20), 60, 2),
            txn(TransactionKind::Expense, (2024, 12, 31), 10, 3),
        ];

        let periods = MonthlyAggregator::default().merge(&income, &expense);
        let keys: Vec<MonthKey> = periods.iter().map(Period::key).collect();
        assert_eq!(keys, vec![key(2024, 12), key(2025, 3), key(2025, 4)]);

        let april = &periods[2];
        assert_eq!(april.income_total, Money::zero());
        assert_eq!(april.expense_total, Money::from_cents(100));
        for period in &periods {
            assert_eq!(period.balance(), period.income_total - period.expense_total);
        }
    }

    #[test]
    fn test_ordering_is_numeric_not_by_label() {
        // "dez" < "fev" < "jan" alphabetically; numeric order must win
        let income = vec![
            txn(TransactionKind::Income, (2025, 12, 1), 1, 1),
            txn(TransactionKind::Income, (2025, 2, 1), 1, 2),
            txn(TransactionKind::Income, (2026, 1, 1), 1, 3),
            txn(TransactionKind::Income, (2025, 10, 1), 1, 4),
        ];
        let periods = MonthlyAggregator::default().merge(&income, &[]);
        for pair in periods.windows(2) {
            assert!(pair[0].key() <= pair[1].key());
        }
        let labels: Vec<&str> = periods.iter().map(|p| p.month_label.as_str()).collect();
        assert_eq!(labels, ["fev", "out", "dez", "jan"]);
    }

    #[test]
    fn test_empty_streams_give_empty_table() {
        assert!(MonthlyAggregator::default().merge(&[], &[]).is_empty());
    }

    #[test]
    fn test_remaining_window_rolls_over_year() {
        let periods = periods_for(&[(2025, 11), (2025, 12), (2026, 1)]);

        let window = MonthlyAggregator::remaining_window(&periods, key(2025, 11), true);
        let keys: Vec<MonthKey> = window.iter().map(Period::key).collect();
        assert_eq!(keys, vec![key(2025, 11), key(2025, 12), key(2026, 1)]);

        assert!(MonthlyAggregator::remaining_window(&periods, key(2026, 2), true).is_empty());
    }

    #[test]
    fn test_remaining_window_excluding_current() {
        let periods = periods_for(&[(2025, 11), (2025, 12), (2026, 1)]);
        let window = MonthlyAggregator::remaining_window(&periods, key(2025, 11), false);
        let keys: Vec<MonthKey> = window.iter().map(Period::key).collect();
        assert_eq!(keys, vec![key(2025, 12), key(2026, 1)]);
    }

    #[test]
    fn test_transactions_in_month() {
        let income = vec![
            txn(TransactionKind::Income, (2025, 1, 20), 1, 5),
            txn(TransactionKind::Income, (2025, 2, 1), 2, 6),
            txn(TransactionKind::Income, (2025, 1, 5), 3, 7),
        ];
        let january = MonthlyAggregator::transactions_in(&income, key(2025, 1));
        let rows: Vec<usize> = january.iter().map(|t| t.row).collect();
        assert_eq!(rows, vec![7, 5]);
        assert!(MonthlyAggregator::transactions_in(&income, key(2024, 1)).is_empty());
    }

    #[test]
    fn test_year_totals() {
        let income = vec![
            txn(TransactionKind::Income, (2024, 12, 1), 100, 1),
            txn(TransactionKind::Income, (2025, 1, 1), 200, 2),
            txn(TransactionKind::Income, (2025, 6, 1), 300, 3),
        ];
        let expense = vec![txn(TransactionKind::Expense, (2025, 6, 2), 50, 1)];
        let periods = MonthlyAggregator::default().merge(&income, &expense);

        let years = MonthlyAggregator::year_totals(&periods);
        assert_eq!(years.len(), 2);
        assert_eq!(years[1].year, 2025);
        assert_eq!(years[1].totals.income, Money::from_cents(500));
        assert_eq!(years[1].totals.balance(), Money::from_cents(450));

        let totals = MonthlyAggregator::totals(&periods);
        assert_eq!(totals.balance(), Money::from_cents(550));
    }
}
