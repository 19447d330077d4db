//! Presentation-level configuration
//!
//! Resolves how results are shown from the `[output]` file section and the
//! command-line flags.

use sage_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Flags win over file values.
    pub fn resolve(
        file_format: Option<OutputFormat>,
        file_color: bool,
        flag_format: Option<OutputFormat>,
        no_color: bool,
        quiet: bool,
    ) -> Self {
        let format = flag_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color: file_color && !no_color,
            // Progress would interleave with machine-readable output
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }

    /// Apply the color choice to the global `colored` switch.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
