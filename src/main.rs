use anyhow::{Context, Result};
use azqr::analyzers::{build_analyzers, ServiceKind};
use azqr::azure::client::ArmClient;
use azqr::config::{Config, OutputFormat};
use azqr::review::{ReviewContext, ReviewReport, ReviewRunner};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reliability review of Azure resource groups
#[derive(Parser, Debug)]
#[command(name = "azqr", version, about, long_about = None)]
struct Args {
    /// Azure subscription id
    #[arg(short, long)]
    subscription: Option<String>,

    /// Resource group to review (repeatable)
    #[arg(short = 'g', long = "resource-group")]
    resource_groups: Vec<String>,

    /// Services to review, all when omitted
    #[arg(long, value_enum, value_delimiter = ',')]
    services: Vec<ServiceKind>,

    /// Report format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    let Some(path) = log_file else {
        builder.with_writer(std::io::stderr).init();
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    builder
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Log file: {:?}", path);

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_ref())?;

    let config = Config::load();
    let subscription_id = config.effective_subscription(args.subscription.as_deref())?;
    let resource_groups = config.effective_resource_groups(&args.resource_groups)?;
    let services = config.effective_services(&args.services);
    let output = config.effective_output(args.output);

    tracing::info!(
        "Reviewing subscription {} ({} resource groups)",
        subscription_id,
        resource_groups.len()
    );

    let client = ArmClient::from_env()?;
    let ctx = ReviewContext::new(&subscription_id, client);
    let runner = ReviewRunner::new(build_analyzers(&ctx, &services));

    // Dropping the review future cancels any in-flight ARM call
    let outcome = tokio::select! {
        outcome = runner.review_all(&resource_groups) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Review interrupted");
            return Err(anyhow::anyhow!("Review interrupted"));
        }
    };

    let report = ReviewReport::new(&subscription_id, outcome);
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Yaml => serde_yaml::to_string(&report)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;

    if !report.failures.is_empty() {
        eprintln!(
            "{} service reviews failed, see the failures section of the report",
            report.failures.len()
        );
    }

    Ok(())
}
