//! CLI commands for reports
//!
//! Every report prints to the terminal by default, as JSON with `--json`, or
//! is exported as CSV with `--output`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthKey;
use crate::reports::{
    InvestmentReport, MonthDetailReport, PeriodOverviewReport, RemainingReport, SummaryReport,
};
use crate::services::LoadedLedger;

/// Output selection shared by the report commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and balance for every month
    #[command(alias = "overview")]
    Periods {
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Transactions of one month
    Month {
        /// Month to show (YYYY-MM or MM/YYYY)
        month: String,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Months from a reference month onward with the projected balance
    Remaining {
        /// Reference month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        from: Option<String>,

        /// Start the window after the reference month
        #[arg(long)]
        exclude_current: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Grand totals, yearly totals and row statistics
    Summary {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Investment contributions and net worth per month
    #[command(alias = "networth")]
    Investments {
        #[command(flatten)]
        out: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    ledger: LoadedLedger,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Periods { out } => {
            let report = PeriodOverviewReport::generate(&ledger);
            emit(&report, &out, "Period", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Month { month, out } => {
            let key = parse_month(&month)?;
            let report = MonthDetailReport::generate(&ledger, key);
            emit(&report, &out, "Month", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Remaining {
            from,
            exclude_current,
            out,
        } => {
            let reference = match from {
                Some(s) => parse_month(&s)?,
                None => MonthKey::current(),
            };
            let ledger = if exclude_current {
                ledger.with_include_current_month(false)
            } else {
                ledger
            };
            let report = RemainingReport::generate(&ledger, reference);
            emit(&report, &out, "Remaining", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
        ReportCommands::Summary { json } => {
            let report = SummaryReport::generate(&ledger);
            if json {
                print_json(&report)
            } else {
                print!("{}", report.format_terminal(symbol));
                Ok(())
            }
        }
        ReportCommands::Investments { out } => {
            let report = InvestmentReport::generate(&ledger);
            emit(&report, &out, "Investment", |w| report.export_csv(w), || {
                report.format_terminal(symbol)
            })
        }
    }
}

fn parse_month(s: &str) -> LedgerResult<MonthKey> {
    MonthKey::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2025-01)",
            e
        ))
    })
}

fn emit<R: Serialize>(
    report: &R,
    out: &OutputArgs,
    name: &str,
    export: impl FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
    terminal: impl FnOnce() -> String,
) -> LedgerResult<()> {
    if let Some(path) = &out.output {
        let mut writer = create_output(path)?;
        export(&mut writer)?;
        writer.flush()?;
        println!("{} report exported to: {}", name, path.display());
        Ok(())
    } else if out.json {
        print_json(report)
    } else {
        print!("{}", terminal());
        Ok(())
    }
}

fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn print_json<R: Serialize>(report: &R) -> LedgerResult<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grid;
    use crate::services::LedgerService;
    use crate::source::InMemorySource;
    use tempfile::TempDir;

    fn ledger() -> LoadedLedger {
        let grid = Grid::from_text_rows(vec![
            vec!["", "DATA", "MES", "DESCRICAO", "VALOR", "", "DATA", "MES", "DESCRICAO", "VALOR"],
            vec![
                "", "05/01/2025", "jan", "salario", "1.500,00", "", "10/01/2025", "jan", "aluguel",
                "800,00",
            ],
        ]);
        let source = InMemorySource::new("memory").with_sheet("PLANILHA", grid);
        LedgerService::new(&Settings::default()).load(&source).unwrap()
    }

    #[test]
    fn test_invalid_month_is_validation_error() {
        let err = handle_report_command(
            ledger(),
            &Settings::default(),
            ReportCommands::Month {
                month: "janeiro".into(),
                out: OutputArgs::default(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_csv_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("periods.csv");

        handle_report_command(
            ledger(),
            &Settings::default(),
            ReportCommands::Periods {
                out: OutputArgs {
                    json: false,
                    output: Some(path.clone()),
                },
            },
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("2025,1,jan,1500.00,800.00,700.00"));
    }

    #[test]
    fn test_output_into_missing_directory_fails() {
        let err = create_output(Path::new("/no/such/dir/out.csv")).unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
    }
}
