//! Terminal output: progress bar, status lines and the run summary.
//!
//! Everything here writes to stderr. Colors follow `--no-color`, then
//! `NO_COLOR`/`FORCE_COLOR`, then terminal detection via `console`.

mod format;
mod messages;
mod progress;

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, Style};

pub use format::{format_duration, print_summary, RunSummary};
pub use messages::{error, info, success, warning};
pub use progress::AnalyzeProgress;

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Whether the environment allows colors on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether status lines are colored. Call early in `main`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Apply `style` when colors are enabled.
pub(crate) fn paint(text: &str, style: Style) -> String {
    if colors_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
