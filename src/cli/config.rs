//! The `config` command: show or initialize settings

use std::path::Path;

use crate::config::{SheetledgerPaths, Settings};
use crate::error::LedgerResult;

/// Print the resolved configuration, or write it out with `init`
///
/// `config_file` is the explicit `--config` path, if any.
pub fn handle_config_command(
    paths: &SheetledgerPaths,
    settings: &Settings,
    config_file: Option<&Path>,
    init: bool,
) -> LedgerResult<()> {
    if init {
        let target = match config_file {
            Some(path) => {
                settings.save_to(path)?;
                path.to_path_buf()
            }
            None => {
                settings.save(paths)?;
                paths.settings_file()
            }
        };
        println!("Settings written to: {}", target.display());
        return Ok(());
    }

    print!("{}", describe(paths, settings, config_file));
    Ok(())
}

fn describe(paths: &SheetledgerPaths, settings: &Settings, config_file: Option<&Path>) -> String {
    let settings_file = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.settings_file());
    let status = if settings_file.exists() {
        ""
    } else {
        " (not written yet, defaults in use)"
    };

    let mut output = String::new();
    output.push_str("sheetledger Configuration\n");
    output.push_str("=========================\n");
    output.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!(
        "Settings file:    {}{}\n",
        settings_file.display(),
        status
    ));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!(
        "  Source:                {}\n",
        settings.source.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Sheet:                 {}\n",
        settings.sheet.as_deref().unwrap_or("(first sheet)")
    ));
    output.push_str(&format!(
        "  Investment sheet:      {}\n",
        settings.investment_sheet.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!("  Header rows:           {}\n", settings.header_rows));
    output.push_str(&format!("  Day-first dates:       {}\n", settings.day_first));
    output.push_str(&format!("  Currency symbol:       {}\n", settings.currency_symbol));
    output.push_str(&format!("  Month labels:          {:?}\n", settings.month_labels));
    output.push_str(&format!(
        "  Include current month: {}\n",
        settings.include_current_month
    ));
    output.push_str(&format!("  Layout:                {:?}\n", settings.layout));
    output
}
