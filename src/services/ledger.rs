//! Ledger service
//!
//! Loads a spreadsheet source end to end and exposes the resulting periods,
//! transactions and investments to the reports.

use serde::Serialize;
use tracing::{info, warn};

use super::aggregator::MonthlyAggregator;
use super::investment::InvestmentTracker;
use super::normalizer::{BlockStats, Normalizer};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::{
    InvestmentEntry, MonthKey, MonthLabels, MonthlyInvestment, NetWorthPoint, Period, Totals,
    Transaction, YearTotals,
};
use crate::source::GridSource;

/// Service for loading ledgers
pub struct LedgerService<'a> {
    settings: &'a Settings,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Fetch, normalize and aggregate a source
    pub fn load(&self, source: &dyn GridSource) -> LedgerResult<LoadedLedger> {
        let settings = self.settings;
        let grid = source.fetch_sheet(settings.sheet.as_deref())?;

        let normalizer = Normalizer::new(settings.normalize_options());
        let ledger = normalizer.normalize(&grid)?;

        let aggregator = MonthlyAggregator::new(settings.month_labels);
        let periods = aggregator.merge(&ledger.income, &ledger.expense);

        let investments = self.load_investments(source)?;

        info!(
            source = source.describe(),
            income = ledger.income.len(),
            expense = ledger.expense.len(),
            periods = periods.len(),
            investments = investments.len(),
            "ledger loaded"
        );

        Ok(LoadedLedger {
            income: ledger.income,
            expense: ledger.expense,
            periods,
            investments,
            income_stats: ledger.income_stats,
            expense_stats: ledger.expense_stats,
            include_current_month: settings.include_current_month,
            labels: settings.month_labels,
            tracker: self.tracker(),
        })
    }

    fn tracker(&self) -> InvestmentTracker {
        let settings = self.settings;
        InvestmentTracker::new(
            settings.investment_layout.clone(),
            settings.header_rows,
            settings.normalize_options().matchers(),
            settings.month_labels,
        )
    }

    fn load_investments(&self, source: &dyn GridSource) -> LedgerResult<Vec<InvestmentEntry>> {
        let Some(sheet) = self.settings.investment_sheet.as_deref() else {
            return Ok(Vec::new());
        };
        if !source.has_sheet(sheet) {
            warn!(sheet, source = source.describe(), "investment sheet not found, skipping");
            return Ok(Vec::new());
        }

        let grid = source.fetch_sheet(Some(sheet))?;
        self.tracker().extract(&grid)
    }
}

/// Income and expense transactions of one month
#[derive(Debug, Clone, Serialize)]
pub struct MonthTransactions<'a> {
    pub month: MonthKey,
    pub income: Vec<&'a Transaction>,
    pub expense: Vec<&'a Transaction>,
}

/// Result of a successful load
pub struct LoadedLedger {
    income: Vec<Transaction>,
    expense: Vec<Transaction>,
    periods: Vec<Period>,
    investments: Vec<InvestmentEntry>,
    income_stats: BlockStats,
    expense_stats: BlockStats,
    include_current_month: bool,
    labels: MonthLabels,
    tracker: InvestmentTracker,
}

impl LoadedLedger {
    /// Every month with activity, oldest first
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn income(&self) -> &[Transaction] {
        &self.income
    }

    pub fn expense(&self) -> &[Transaction] {
        &self.expense
    }

    pub fn income_stats(&self) -> BlockStats {
        self.income_stats
    }

    pub fn expense_stats(&self) -> BlockStats {
        self.expense_stats
    }

    pub fn labels(&self) -> MonthLabels {
        self.labels
    }

    pub fn include_current_month(&self) -> bool {
        self.include_current_month
    }

    pub fn period(&self, key: MonthKey) -> Option<&Period> {
        self.periods.iter().find(|p| p.key() == key)
    }

    /// Both transaction streams of one month, each ordered by date
    pub fn transactions_in(&self, key: MonthKey) -> MonthTransactions<'_> {
        MonthTransactions {
            month: key,
            income: MonthlyAggregator::transactions_in(&self.income, key),
            expense: MonthlyAggregator::transactions_in(&self.expense, key),
        }
    }

    /// Periods from `reference` onward, honoring `include_current_month`
    pub fn remaining_from(&self, reference: MonthKey) -> Vec<Period> {
        MonthlyAggregator::remaining_window(&self.periods, reference, self.include_current_month)
    }

    /// Periods from the current calendar month onward
    pub fn remaining_from_now(&self) -> Vec<Period> {
        self.remaining_from(MonthKey::current())
    }

    pub fn with_include_current_month(mut self, include: bool) -> Self {
        self.include_current_month = include;
        self
    }

    pub fn totals(&self) -> Totals {
        MonthlyAggregator::totals(&self.periods)
    }

    pub fn year_totals(&self) -> Vec<YearTotals> {
        MonthlyAggregator::year_totals(&self.periods)
    }

    pub fn investments(&self) -> &[InvestmentEntry] {
        &self.investments
    }

    pub fn monthly_investments(&self) -> Vec<MonthlyInvestment> {
        self.tracker.monthly(&self.investments)
    }

    pub fn net_worth(&self) -> Vec<NetWorthPoint> {
        self.tracker
            .net_worth(&self.periods, &self.monthly_investments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockKind, Grid, Money};
    use crate::source::InMemorySource;

    fn main_grid() -> Grid {
        Grid::from_text_rows(vec![
            vec!["", "DATA", "MES", "DESCRICAO", "VALOR", "", "DATA", "MES", "DESCRICAO", "VALOR"],
            vec!["", "DATA", "MES", "DESCRICAO", "VALOR", "", "DATA", "MES", "DESCRICAO", "VALOR"],
            vec![
                "", "05/01/2025", "jan", "salario", "R$ 1.500,00", "", "10/01/2025", "jan", "aluguel",
                "R$ 800,00",
            ],
            vec!["", "01/02/2025", "fev", "salario", "R$ 1.500,00", "", "", "", "", ""],
            vec!["", "03/11/2025", "nov", "salario", "R$ 1.500,00", "", "", "", "", ""],
            vec!["", "", "", "", "", "", "02/12/2025", "dez", "presentes", "R$ 300,00"],
            vec!["", "04/01/2026", "jan", "salario", "R$ 1.600,00", "", "", "", "", ""],
        ])
    }

    fn investment_grid() -> Grid {
        Grid::from_text_rows(vec![
            vec!["DATA", "VALOR"],
            vec!["15/01/2025", "R$ 200,00"],
            vec!["15/12/2025", "R$ 100,00"],
        ])
    }

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    fn load(source: &InMemorySource, settings: &Settings) -> LedgerResult<LoadedLedger> {
        LedgerService::new(settings).load(source)
    }

    #[test]
    fn test_load_end_to_end() {
        let source = InMemorySource::new("memory")
            .with_sheet("PLANILHA", main_grid())
            .with_sheet("INVESTIMENTO", investment_grid());
        let ledger = load(&source, &Settings::default()).unwrap();

        let keys: Vec<MonthKey> = ledger.periods().iter().map(Period::key).collect();
        assert_eq!(
            keys,
            vec![key(2025, 1), key(2025, 2), key(2025, 11), key(2025, 12), key(2026, 1)]
        );

        let january = ledger.period(key(2025, 1)).unwrap();
        assert_eq!(january.balance(), Money::from_cents(70_000));
        let december = ledger.period(key(2025, 12)).unwrap();
        assert_eq!(december.income_total, Money::zero());
        assert_eq!(december.balance(), Money::from_cents(-30_000));

        // the repeated header row is dropped on both sides
        assert_eq!(ledger.income_stats().dropped_bad_date, 1);
        assert_eq!(ledger.expense_stats().dropped_bad_date, 1);

        assert_eq!(ledger.investments().len(), 2);
        assert_eq!(ledger.monthly_investments()[1].cumulative, Money::from_cents(30_000));
    }

    #[test]
    fn test_remaining_window_follows_setting() {
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", main_grid());
        let ledger = load(&source, &Settings::default()).unwrap();

        let window: Vec<MonthKey> = ledger
            .remaining_from(key(2025, 11))
            .iter()
            .map(Period::key)
            .collect();
        assert_eq!(window, vec![key(2025, 11), key(2025, 12), key(2026, 1)]);
        assert!(ledger.remaining_from(key(2026, 2)).is_empty());

        let settings = Settings {
            include_current_month: false,
            ..Settings::default()
        };
        let ledger = load(&source, &settings).unwrap();
        assert_eq!(ledger.remaining_from(key(2025, 11)).len(), 2);
        assert_eq!(
            ledger
                .with_include_current_month(true)
                .remaining_from(key(2025, 11))
                .len(),
            3
        );
    }

    #[test]
    fn test_transactions_in_month() {
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", main_grid());
        let ledger = load(&source, &Settings::default()).unwrap();

        let january = ledger.transactions_in(key(2025, 1));
        assert_eq!(january.income.len(), 1);
        assert_eq!(january.expense[0].description, "aluguel");

        let empty = ledger.transactions_in(key(2030, 1));
        assert!(empty.income.is_empty() && empty.expense.is_empty());
    }

    #[test]
    fn test_missing_investment_sheet_is_not_an_error() {
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", main_grid());
        let ledger = load(&source, &Settings::default()).unwrap();
        assert!(ledger.investments().is_empty());
        assert_eq!(ledger.net_worth().len(), ledger.periods().len());
    }

    #[test]
    fn test_malformed_investment_sheet_fails() {
        let source = InMemorySource::new("memory")
            .with_sheet("PLANILHA", main_grid())
            .with_sheet(
                "INVESTIMENTO",
                Grid::from_text_rows(vec![vec!["ATIVO"], vec!["CDB"]]),
            );
        let err = load(&source, &Settings::default()).err().unwrap();
        assert_eq!(err.malformed_block(), Some(BlockKind::Investment));
    }

    #[test]
    fn test_named_sheet_must_exist() {
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", main_grid());
        let settings = Settings {
            sheet: Some("2024".into()),
            ..Settings::default()
        };
        let err = load(&source, &settings).err().unwrap();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_empty_sheet_yields_empty_ledger() {
        let source = InMemorySource::new("memory").with_sheet(
            "PLANILHA",
            Grid::from_text_rows(vec![vec![""; 10]]),
        );
        let ledger = load(&source, &Settings::default()).unwrap();
        assert!(ledger.periods().is_empty());
        assert!(ledger.remaining_from_now().is_empty());
        assert_eq!(ledger.totals(), Totals::default());
    }
}
