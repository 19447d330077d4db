//! Progress notification port
//!
//! Defines the interface for reporting progress while an article is
//! extracted and analysed.

/// Stages of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Getting article text from a link, text or PDF
    Extract,
    /// Bias analysis call
    Analyze,
    /// Neutral summary call
    Summarize,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Extract => "Extracting article",
            Stage::Analyze => "Analyzing bias",
            Stage::Summarize => "Summarizing",
        }
    }
}

/// Callback for progress updates
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a stage completes successfully
    fn on_stage_complete(&self, stage: Stage);

    /// Called when a stage fails
    fn on_stage_failed(&self, _stage: Stage) {}

    /// Called before a fetch proxy is tried
    fn on_proxy_attempt(&self, _proxy: &str) {}

    /// Called when a fetch proxy fails and the next one will be tried
    fn on_proxy_failed(&self, _proxy: &str, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
