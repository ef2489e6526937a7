//! Tracing setup for the command-line binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "SHEETLEDGER_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize the global subscriber once, writing to stderr
///
/// `SHEETLEDGER_LOG` wins when set; otherwise only warnings are shown, or
/// debug output with `verbose`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // A subscriber installed by an embedding program takes precedence
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sheetledger=debug"
    } else {
        "sheetledger=warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "sheetledger=warn");
        assert_eq!(default_directive(true), "sheetledger=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(false);
        init_tracing(true);
    }
}
