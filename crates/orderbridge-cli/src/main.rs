//! orderbridge regression harness
//!
//! Runs the v1/v2 compatibility checks against a live API or the built-in
//! fixtures and prints a report. Exit status is 0 when every check passes,
//! 1 when any check fails and 2 when the response source itself fails.

mod checks;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use checks::{CheckContext, Mode};
use orderbridge_client::SourceConfig;
use orderbridge_core::{Classifier, DeprecationPolicy};
use report::OutputFormat;

/// Exit status when at least one check failed.
const EXIT_CHECKS_FAILED: u8 = 1;

/// Exit status when the run could not complete.
const EXIT_FATAL: u8 = 2;

/// orderbridge regression harness
#[derive(Parser, Debug)]
#[command(name = "orderbridge")]
#[command(version, about = "v1/v2 order API regression harness")]
pub struct Args {
    /// Check suite to run
    #[arg(long, env = "MODE", default_value = "raw", value_enum, ignore_case = true)]
    pub mode: Mode,

    /// Base URL of the live API; built-in fixtures are used when unset
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Fixture table to use instead of the built-in one
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// HTTP request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Retries for transport failures
    #[arg(long, default_value_t = 0)]
    pub retries: usize,

    /// Pause between retries in milliseconds
    #[arg(long, default_value_t = 50)]
    pub retry_backoff_ms: u64,

    /// Classification policy for 410 responses
    #[arg(long, default_value = "require-sentinel", value_enum)]
    pub deprecation_policy: DeprecationPolicy,
}

impl Args {
    /// Response source configuration selected by these arguments.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::default()
            .with_base_url(self.base_url.clone())
            .with_fixtures_path(self.fixtures.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_retries(self.retries)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so the report on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_CHECKS_FAILED),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Run the selected suite and print the report. Returns whether all passed.
async fn run(args: Args) -> Result<bool, orderbridge_client::Error> {
    let config = args.source_config();
    let source = config.build()?;
    let classifier = Classifier::new(args.deprecation_policy);

    tracing::info!(
        mode = %args.mode,
        source = %source.describe(),
        policy = %classifier.policy(),
        "running checks"
    );

    let ctx = CheckContext::new(source.as_ref(), classifier);
    let results = checks::run_checks(&ctx, args.mode).await?;

    let formatter = report::create_formatter(args.format);
    println!("{}", formatter.format_report(args.mode, &results));

    Ok(report::passed(&results) == results.len())
}
