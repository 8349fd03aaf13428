//! Gateway configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use orderbridge_client::SourceConfig;
use orderbridge_core::DeprecationPolicy;

/// orderbridge gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "orderbridge-gateway")]
#[command(about = "Legacy-compatible HTTP shim over the v2 orders API")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Base URL of the upstream v2 API. Fixtures answer when unset.
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Fixture table used for replay and as the default upstream.
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Upstream request timeout (ms).
    #[arg(long, default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    /// Number of retries for failed upstream requests.
    #[arg(long, default_value_t = 0)]
    pub request_retries: usize,

    /// Backoff (ms) between upstream retries.
    #[arg(long, default_value_t = 50)]
    pub request_retry_backoff_ms: u64,

    /// Classification policy for 410 responses.
    #[arg(long, default_value = "require-sentinel", value_enum)]
    pub deprecation_policy: DeprecationPolicy,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Base URL of the upstream v2 API.
    pub base_url: Option<String>,
    /// Fixture table path.
    pub fixtures_path: Option<PathBuf>,
    /// Upstream request timeout.
    pub request_timeout: Duration,
    /// Number of retries for failed upstream requests.
    pub request_retries: usize,
    /// Backoff between upstream retries.
    pub request_retry_backoff: Duration,
    /// Classification policy for 410 responses.
    pub deprecation_policy: DeprecationPolicy,
}

impl GatewayConfig {
    /// Upstream response source configuration.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::default()
            .with_base_url(self.base_url.clone())
            .with_fixtures_path(self.fixtures_path.clone())
            .with_timeout(self.request_timeout)
            .with_retries(self.request_retries)
            .with_retry_backoff(self.request_retry_backoff)
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            base_url: args.base_url.clone(),
            fixtures_path: args.fixtures.clone(),
            request_timeout: Duration::from_millis(args.request_timeout_ms),
            request_retries: args.request_retries,
            request_retry_backoff: Duration::from_millis(args.request_retry_backoff_ms),
            deprecation_policy: args.deprecation_policy,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            base_url: None,
            fixtures_path: None,
            request_timeout: Duration::from_secs(10),
            request_retries: 0,
            request_retry_backoff: Duration::from_millis(50),
            deprecation_policy: DeprecationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_config() {
        let args = Args::try_parse_from([
            "orderbridge-gateway",
            "--listen",
            "127.0.0.1:9090",
            "--base-url",
            "https://api.example.com",
            "--request-timeout-ms",
            "1500",
            "--deprecation-policy",
            "any-gone",
        ])
        .unwrap();

        let config = GatewayConfig::from(&args);
        assert_eq!(config.listen_addr, "127.0.0.1:9090");
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.deprecation_policy, DeprecationPolicy::AnyGone);

        let source = config.source_config();
        assert!(source.is_live());
        assert_eq!(source.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_default_config_uses_fixtures() {
        let config = GatewayConfig::default();
        assert!(!config.source_config().is_live());
        assert_eq!(config.deprecation_policy, DeprecationPolicy::RequireSentinel);
    }
}
