//! CLI entrypoint for Spectrum Sage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use sage_application::{
    AnalysisLogger, AnalyzeArticleUseCase, AnalyzeInput, ExtractArticleUseCase, LlmGateway,
    NoAnalysisLogger, NoProgress, ProgressNotifier, ResolveContentUseCase, SummarizeUseCase,
};
use sage_domain::ArticleInput;
use sage_infrastructure::{
    ConfigLoader, FileConfig, JsonlAnalysisLogger, LopdfTextReader, ReqwestPageFetcher,
    RoutingGateway, ScraperReadability, build_providers, provider_client,
};
use sage_presentation::{
    Cli, Command, ConsoleFormatter, InputArgs, OutputConfig, ProgressReporter, SimpleProgress,
    resolve_input,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?
    };

    // Held until exit so buffered file logs are written
    let _log_guard = init_logging(cli.verbose, config.logging.log_dir.as_deref());

    info!("Starting Spectrum Sage");

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }

    let command = cli.resolved_command();
    if command != Command::Config
        && let Some(issue) = issues.iter().find(|i| i.is_error())
    {
        bail!("Invalid configuration: {}", issue.message);
    }

    let output = OutputConfig::resolve(
        config.output.format,
        config.output.color,
        cli.output.map(Into::into),
        cli.no_color,
        cli.quiet,
    );
    output.apply_color();

    let progress: Box<dyn ProgressNotifier> = if !output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    // === Dependency Injection ===
    let behavior = config.analysis.to_behavior_config();
    let client = provider_client(behavior.timeout)?;
    let providers = build_providers(&config.providers, client);
    let gateway: Arc<dyn LlmGateway> = Arc::new(RoutingGateway::new(providers, &config.providers));

    let logger: Arc<dyn AnalysisLogger> = match config
        .logging
        .analysis_log
        .as_ref()
        .and_then(JsonlAnalysisLogger::open)
    {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoAnalysisLogger),
    };

    let fetcher = ReqwestPageFetcher::new(
        Duration::from_secs(config.extraction.timeout_seconds),
        config
            .extraction
            .user_agent
            .as_deref()
            .unwrap_or(sage_infrastructure::http::DEFAULT_USER_AGENT),
    )?;
    let (proxies, _) = config.extraction.endpoints();
    let extractor = ExtractArticleUseCase::new(Arc::new(fetcher), Arc::new(ScraperReadability::new()))
        .with_proxies(proxies)
        .with_logger(logger.clone());
    let resolver = Arc::new(
        ResolveContentUseCase::new(extractor, Arc::new(LopdfTextReader::new()))
            .with_min_content_chars(behavior.min_content_chars),
    );

    match command {
        Command::Analyze(args) => {
            let model = cli
                .model
                .as_deref()
                .map(Into::into)
                .unwrap_or_else(|| config.analysis.analysis_model());
            let use_case = AnalyzeArticleUseCase::new(gateway, resolver)
                .with_config(behavior)
                .with_logger(logger);

            let input = AnalyzeInput::new(read_input(&args)?, model);
            let report = use_case
                .execute(input, progress.as_ref())
                .await
                .map_err(|e| anyhow!(e.user_message()))?;

            println!("{}", ConsoleFormatter::render(&report, output.format));
        }
        Command::Summarize(args) => {
            let model = cli
                .model
                .as_deref()
                .map(Into::into)
                .unwrap_or_else(|| config.analysis.summary_model());
            let use_case = SummarizeUseCase::new(gateway, resolver)
                .with_config(behavior)
                .with_logger(logger);

            let input = AnalyzeInput::new(read_input(&args)?, model);
            let report = use_case
                .execute(input, progress.as_ref())
                .await
                .map_err(|e| anyhow!(e.user_message()))?;

            if output.format == sage_domain::OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", ConsoleFormatter::format_summary(&report));
            }
        }
        Command::Extract(args) => {
            let content = resolver.execute(read_input(&args)?, progress.as_ref()).await?;
            println!("{}", ConsoleFormatter::format_extracted(&content));
        }
        Command::Models => {
            let models = gateway
                .available_models()
                .await
                .context("Failed to list models")?;
            print!("{}", ConsoleFormatter::format_models(&models));
        }
        Command::Config => print_config(&cli, &config, &issues)?,
    }

    Ok(())
}

fn read_input(args: &InputArgs) -> Result<ArticleInput> {
    Ok(resolve_input(args, || {
        if std::io::stdin().is_terminal() {
            eprintln!("Reading article text from stdin (Ctrl-D to finish)...");
        }
        std::io::read_to_string(std::io::stdin())
    })?)
}

fn print_config(
    cli: &Cli,
    config: &FileConfig,
    issues: &[sage_infrastructure::ConfigIssue],
) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled (--no-config)");
    } else {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
    }

    println!();
    if issues.is_empty() {
        println!("No configuration problems found.");
    } else {
        for issue in issues {
            println!("{}", issue);
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` is honoured when no `-v` flag is given. With a log directory,
/// a daily rolling file receives the same events.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "spectrum-sage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
