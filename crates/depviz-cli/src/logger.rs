//! Logging setup for the depviz CLI.
//!
//! Library crates log through `tracing`; this installs the subscriber.
//! Output goes to stderr so reports and `detect --json` stay clean on stdout.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for the depviz crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for the depviz crates

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "depviz_graph=debug,depviz_detect=debug,depviz_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "depviz_graph=info,depviz_detect=info,depviz_cli=info";

/// Build the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the global subscriber with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_build() {
        let _ = filter_for(true, false);
        let _ = filter_for(false, true);
        let _ = EnvFilter::new(DEFAULT_FILTER);
    }

    #[test]
    fn test_repeated_init_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
