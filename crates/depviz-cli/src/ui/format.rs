//! Duration formatting and the end-of-run summary.

use std::path::PathBuf;
use std::time::Duration;

use owo_colors::Style;

use super::paint;

/// Format a duration as `50ms`, `1.50s` or `1m 30s`.
///
/// ```
/// use std::time::Duration;
/// use depviz_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Figures printed after an analyze run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub entries: usize,
    pub nodes: usize,
    pub max_depth: usize,
    pub elapsed: Duration,
    pub output: PathBuf,
}

/// Print the run summary to stderr.
pub fn print_summary(summary: &RunSummary) {
    eprintln!("\n{}", paint("Analysis Summary", Style::new().bold().underline()));
    eprintln!(
        "  {} {} entries, {} nodes, depth {}",
        paint("▸", Style::new().blue()),
        summary.entries,
        summary.nodes,
        summary.max_depth
    );
    eprintln!(
        "  {} {} in {}",
        paint("Report:", Style::new().bold()),
        paint(&summary.output.display().to_string(), Style::new().green()),
        paint(&format_duration(summary.elapsed), Style::new().green())
    );
}
