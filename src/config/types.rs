//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CHAIN_LENGTH, DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT,
    FALLBACK_REQUEST_TIMEOUT, HEAD_PROBE_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the per-URL results written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `start -> hop -> final`, one line per URL
    Plain,
    /// One JSON object per line
    Jsonl,
}

/// What a hop does when the GET fallback itself fails at the transport level.
///
/// Non-success statuses and malformed `Location` headers fail the chain in
/// both modes; only connection errors and fallback timeouts are affected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TransportFailureMode {
    /// Fail the whole chain resolution
    #[default]
    Propagate,
    /// Treat the hop as "no redirect" and end the chain at the current URL
    EndChain,
}

/// Library and CLI configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// with `..Default::default()` by library callers.
///
/// # Examples
///
/// ```no_run
/// use redirect_chain::Config;
///
/// let config = Config {
///     urls: vec!["https://example.com".to_string()],
///     max_chain_length: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "redirect_chain",
    about = "Resolves the HTTP redirect chain of each input URL, one hop at a time."
)]
pub struct Config {
    /// URLs to resolve (read from --file or stdin when omitted)
    #[arg(value_parser)]
    pub urls: Vec<String>,

    /// File to read URLs from, one per line (`-` for stdin)
    #[arg(long, short = 'f', value_parser)]
    pub file: Option<PathBuf>,

    /// Maximum number of URLs in a chain, including the starting URL
    #[arg(long, default_value_t = DEFAULT_MAX_CHAIN_LENGTH)]
    pub max_chain_length: usize,

    /// Deadline for the lightweight HEAD probe in milliseconds
    #[arg(long, default_value_t = HEAD_PROBE_TIMEOUT.as_millis() as u64)]
    pub head_timeout_ms: u64,

    /// Deadline for the GET fallback request in seconds
    #[arg(long, default_value_t = FALLBACK_REQUEST_TIMEOUT.as_secs())]
    pub fallback_timeout_secs: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum number of chains resolved concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Additional host that should never receive a HEAD probe (repeatable)
    #[arg(long = "no-head-domain", value_name = "HOST")]
    pub no_head_domains: Vec<String>,

    /// Behavior when the GET fallback fails at the transport level
    #[arg(long, value_enum, default_value_t = TransportFailureMode::Propagate)]
    pub transport_failure: TransportFailureMode,

    /// Output format: plain|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// HEAD probe deadline as a `Duration`.
    pub fn head_timeout(&self) -> Duration {
        Duration::from_millis(self.head_timeout_ms)
    }

    /// GET fallback deadline as a `Duration`.
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
            head_timeout_ms: HEAD_PROBE_TIMEOUT.as_millis() as u64,
            fallback_timeout_secs: FALLBACK_REQUEST_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            no_head_domains: Vec::new(),
            transport_failure: TransportFailureMode::Propagate,
            output: OutputFormat::Plain,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
