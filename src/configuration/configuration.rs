use crate::dispatcher::FailurePolicy;
use crate::fixtures::FixtureSet;
use anyhow::{Context, Result, bail};
use clap::Parser;
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/message";

/// Sends fixture notifications to a PushBits-compatible endpoint and prints each response.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Full URL of the message endpoint.
    #[arg(long, env = "PUSH_PROBE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Application token, sent as the `token` query parameter.
    #[arg(long, env = "PUSH_PROBE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Which fixture collection to send.
    #[arg(long = "set", value_enum, default_value_t = FixtureSet::Priorities)]
    pub fixture_set: FixtureSet,

    /// Keep sending after a transport failure instead of stopping.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Print the JSON documents instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Request timeout in seconds. The HTTP client default applies when unset.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Log level, overridden by RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Url,
    pub token: String,
    pub fixture_set: FixtureSet,
    pub policy: FailurePolicy,
    pub dry_run: bool,
    pub timeout: Option<Duration>,
    pub log_level: String,
}

/// Parses the message endpoint. A `token` already present in its query is dropped,
/// the configured token is the only one ever sent.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid endpoint URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Unsupported endpoint scheme '{}', expected http or https", url.scheme());
    }

    if url.query_pairs().any(|(key, _)| key == "token") {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "token")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(&kept);
        }
    }

    Ok(url)
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let endpoint = parse_endpoint(&cli.endpoint)?;

        let token = cli.token.map(|t| t.trim().to_string()).unwrap_or_default();
        if token.is_empty() && !cli.dry_run {
            bail!("No application token configured, pass --token or set PUSH_PROBE_TOKEN");
        }

        let policy = if cli.continue_on_error {
            FailurePolicy::ContinueOnFailure
        } else {
            FailurePolicy::StopOnFirstFailure
        };

        Ok(Config {
            endpoint,
            token,
            fixture_set: cli.fixture_set,
            policy,
            dry_run: cli.dry_run,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            log_level: cli.log_level,
        })
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).context("Failed to parse command line")?;
        Config::try_from(cli)
    }
}
