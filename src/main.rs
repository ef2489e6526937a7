use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sheetledger::cli::{handle_config_command, handle_report_command, ReportCommands};
use sheetledger::config::{SheetledgerPaths, Settings};
use sheetledger::logging::init_tracing;
use sheetledger::services::LedgerService;
use sheetledger::source::open_source;

#[derive(Parser)]
#[command(
    name = "sheetledger",
    version,
    about = "Monthly income/expense ledger from a personal-finance spreadsheet",
    long_about = "sheetledger reads a spreadsheet that keeps income and expenses in two \
                  side-by-side column blocks, and reports monthly totals, balances, \
                  the remaining months of the plan and investment contributions."
)]
struct Cli {
    /// Workbook path, CSV file or URL (overrides the configured source)
    #[arg(long, global = true, env = "SHEETLEDGER_SOURCE")]
    source: Option<String>,

    /// Sheet holding the income/expense blocks
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to disk
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = SheetledgerPaths::new()?;
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_or_create(&paths)?,
    };
    if let Some(source) = cli.source {
        settings.source = Some(source);
    }
    if let Some(sheet) = cli.sheet {
        settings.sheet = Some(sheet);
    }

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let source = open_source(settings.require_source()?, &settings)?;
            let ledger = LedgerService::new(&settings).load(source.as_ref())?;
            handle_report_command(ledger, &settings, cmd)?;
        }
        Some(Commands::Config { init }) => {
            handle_config_command(&paths, &settings, cli.config.as_deref(), init)?;
        }
        None => {
            println!("sheetledger - monthly ledger from a spreadsheet");
            println!();
            println!("Run 'sheetledger --help' for usage information.");
            println!("Run 'sheetledger --source <file> periods' to see every month.");
        }
    }

    Ok(())
}
