//! Progress bar for per-entry analysis.

use std::time::Duration;

use depviz_graph::{paths, ForestProgress};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// One tick per analyzed entry.
///
/// Hidden when stderr is not a terminal, in CI or in quiet mode.
pub struct AnalyzeProgress {
    bar: ProgressBar,
}

impl AnalyzeProgress {
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = ProgressBar::new(total as u64);
        if visible && Self::should_show() {
            let style = ProgressStyle::with_template(
                "{spinner:.green} Analyzing [{bar:40.cyan/blue}] {pos}/{len} entries {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
            bar.set_style(style);
            bar.enable_steady_tick(Duration::from_millis(100));
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { bar }
    }

    /// Record one finished entry.
    pub fn tick(&self, event: &ForestProgress) {
        self.bar.set_position(event.completed as u64);
        self.bar.set_message(paths::file_name(&event.entry));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn should_show() -> bool {
        console::user_attended_stderr() && !super::is_ci()
    }
}
