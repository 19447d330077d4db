//! Progress reporting for article extraction and analysis

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sage_application::{ProgressNotifier, Stage};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per stage
pub struct ProgressReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_current(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.current.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn take_current(&self) -> Option<ProgressBar> {
        self.current.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.current.lock()
            && let Some(previous) = guard.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, _stage: Stage) {
        if let Some(pb) = self.take_current() {
            pb.finish_with_message(format!("{} {}", "v".green(), "done".dimmed()));
        }
    }

    fn on_stage_failed(&self, _stage: Stage) {
        if let Some(pb) = self.take_current() {
            pb.finish_with_message(format!("{}", "x failed".red()));
        }
    }

    fn on_proxy_attempt(&self, proxy: &str) {
        self.with_current(|pb| pb.set_message(format!("via {}", proxy)));
    }

    fn on_proxy_failed(&self, proxy: &str, reason: &str) {
        self.with_current(|pb| {
            pb.println(format!("  {} {} ({})", "x".red(), proxy, reason));
        });
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so stdout carries only the report.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_stage_complete(&self, _stage: Stage) {}

    fn on_stage_failed(&self, stage: Stage) {
        eprintln!("  {} {} failed", "x".red(), stage.display_name());
    }

    fn on_proxy_attempt(&self, proxy: &str) {
        eprintln!("  via {}", proxy);
    }

    fn on_proxy_failed(&self, proxy: &str, reason: &str) {
        eprintln!("  {} {} ({})", "x".red(), proxy, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_one_stage_at_a_time() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(Stage::Extract);
        reporter.on_proxy_attempt("allorigins");
        reporter.on_proxy_failed("allorigins", "HTTP 502");
        reporter.on_stage_start(Stage::Analyze);
        assert!(reporter.current.lock().unwrap().is_some());

        reporter.on_stage_complete(Stage::Analyze);
        assert!(reporter.current.lock().unwrap().is_none());

        // Events without an active stage are ignored
        reporter.on_proxy_attempt("thingproxy");
        reporter.on_stage_failed(Stage::Summarize);
    }
}
