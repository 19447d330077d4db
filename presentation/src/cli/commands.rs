//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with perspectives
    Full,
    /// Bias, confidence, factuality and summary only
    Brief,
    /// Reply-schema JSON
    Json,
}

impl From<OutputFormat> for sage_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => sage_domain::OutputFormat::Full,
            OutputFormat::Brief => sage_domain::OutputFormat::Brief,
            OutputFormat::Json => sage_domain::OutputFormat::Json,
        }
    }
}

/// Where the article comes from. At most one may be given; with none,
/// the text is read from stdin.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct InputArgs {
    /// Article URL (starts with http) or article text; "-" reads stdin
    #[arg(value_name = "URL_OR_TEXT")]
    pub input: Option<String>,

    /// Article link
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Article text
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// File holding the article text
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// PDF file holding the article
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze political bias (the default)
    Analyze(InputArgs),
    /// Write a short neutral summary
    Summarize(InputArgs),
    /// Print the extracted article text without calling a model
    Extract(InputArgs),
    /// List the models of every configured provider
    Models,
    /// Show configuration sources, problems and effective values
    Config,
}

/// CLI arguments for spectrum-sage
#[derive(Parser, Debug)]
#[command(name = "spectrum-sage")]
#[command(author, version, about = "AI-generated political bias breakdown of news articles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = r#"
Spectrum Sage reads a news article (link, text or PDF) and asks an LLM for a
breakdown of how it is presented: overall bias, confidence, factuality, a
neutral summary and how left, center and right outlets would cover it.

Configuration files are loaded from (in priority order):
1. SAGE_* environment variables (SAGE_ANALYSIS__MODEL=gpt-4o)
2. --config <path>     Explicit config file
3. ./sage.toml         Project-level config
4. ~/.config/spectrum-sage/config.toml   Global config

API keys are read from GEMINI_API_KEY, OPENAI_API_KEY or ANTHROPIC_API_KEY
(a .env file in the working directory is honoured).

Example:
  spectrum-sage https://news.example/2024/budget-vote
  spectrum-sage --pdf report.pdf -o brief
  pbpaste | spectrum-sage summarize
  spectrum-sage extract --url https://news.example/story
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Article input for the default analyze command
    #[command(flatten)]
    pub input: InputArgs,

    /// Model to use (overrides [analysis] model)
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

impl Cli {
    /// The command to run; bare input means `analyze`.
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Analyze(self.input.clone()))
    }
}
