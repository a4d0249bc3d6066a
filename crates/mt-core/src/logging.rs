//! Logging setup for the mt-core CLI.
//!
//! All log output goes to stderr; stdout is reserved for the report
//! payload. `MT_LOG` (or `RUST_LOG`) overrides the level derived from
//! the `-v` count.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// The default level for a given `-v` count.
fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber. Call once at startup.
pub fn init_logging(verbose: u8, quiet: bool, no_color: bool) {
    let filter = EnvFilter::try_from_env("MT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let use_ansi = !no_color && std::io::stderr().is_terminal();
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_ansi)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(3, false), "trace");
        assert_eq!(level_for(9, false), "trace");
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(3, true), "error");
    }
}
