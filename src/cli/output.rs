//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style("✓").green().bold(), style(msg).green());
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), style(msg).red());
    }

    /// Create a spinner. Dropping it clears the line.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner().with_finish(ProgressFinish::AndClear);
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Clear a spinner and print its success marker.
    pub fn succeed(spinner: ProgressBar, msg: &str) {
        spinner.finish_and_clear();
        Self::success(msg);
    }
}
