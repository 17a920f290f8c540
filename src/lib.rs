//! redirect_chain library: hop-by-hop HTTP redirect chain resolution
//!
//! This library resolves the chain of redirects a URL passes through without
//! letting the HTTP client follow them. Every hop is probed explicitly: a HEAD
//! request with a short deadline first, then a GET when HEAD is skipped,
//! rejected, or times out. Relative `Location` targets are resolved against
//! the current hop and chains are capped at a maximum length.
//!
//! # Example
//!
//! ```no_run
//! use redirect_chain::{DomainPolicy, RedirectResolver, Config};
//! use redirect_chain::initialization::init_redirect_client;
//! use reqwest::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_redirect_client(&Config::default())?;
//! let resolver = RedirectResolver::new(client, DomainPolicy::default());
//!
//! let start = Url::parse("http://example.com")?;
//! let chain = resolver.redirect_chain(&start, 20).await?;
//! for url in &chain {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod policy;

// Re-export public API
pub use app::{is_valid_url, ChainRecord};
pub use config::{Config, LogFormat, LogLevel, OutputFormat, TransportFailureMode};
pub use error_handling::{
    categorize_chain_error, ChainError, ErrorType, InfoType, InitializationError, ProbeStats,
};
pub use fetch::{
    get_location_header, get_redirect_chain, resolve_redirect_target, ProbeOutcome,
    ProbeSettings, RedirectResolver, ResolvedChain,
};
pub use policy::{no_head_request_domains, DomainPolicy};
pub use run::{run_resolve, run_resolve_with_writer, ResolveReport};

// Internal run module (batch resolution of many URLs)
mod run {
    use std::io::Write;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, print_probe_statistics, shutdown_gracefully, validate_and_normalize_url,
        ChainRecord,
    };
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::ProbeStats;
    use crate::fetch::{ProbeSettings, RedirectResolver};
    use crate::initialization::{init_redirect_client, init_semaphore};
    use crate::policy::DomainPolicy;

    /// Results of a batch resolution run.
    #[derive(Debug, Clone)]
    pub struct ResolveReport {
        /// Number of valid URLs that were resolved (successfully or not)
        pub total_urls: usize,
        /// Number of chains resolved successfully
        pub resolved: usize,
        /// Number of chains that failed
        pub failed: usize,
        /// Number of successful chains that hit the length cap
        pub truncated: usize,
        /// Number of input lines rejected by validation
        pub skipped: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Per-URL results, in completion order
        pub records: Vec<ChainRecord>,
    }

    /// Resolves every configured URL and writes one line per URL to stdout.
    ///
    /// See [`run_resolve_with_writer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the HTTP client cannot
    /// be built. Individual chain failures are reported in the output, not as
    /// an error.
    pub async fn run_resolve(config: Config) -> Result<ResolveReport> {
        run_resolve_with_writer(config, std::io::stdout()).await
    }

    /// Resolves every configured URL and writes one line per URL to `out`.
    ///
    /// URLs come from `config.urls` followed by the lines of `config.file`
    /// (`-` for stdin). When neither is given, stdin is read. Blank lines and
    /// lines starting with `#` are ignored; invalid URLs are skipped with a
    /// warning. Chains are resolved concurrently, bounded by
    /// `config.max_concurrency`, and written in completion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the HTTP client cannot be
    /// built, or writing to `out` fails.
    pub async fn run_resolve_with_writer<W: Write>(
        config: Config,
        mut out: W,
    ) -> Result<ResolveReport> {
        let inputs = collect_inputs(&config).await?;

        let client =
            init_redirect_client(&config).context("Failed to initialize redirect client")?;
        let policy = DomainPolicy::from_hosts(
            DomainPolicy::global()
                .hostnames()
                .into_iter()
                .chain(config.no_head_domains.iter().cloned()),
        );
        let stats = Arc::new(ProbeStats::new());
        let resolver = RedirectResolver::new(client, policy)
            .with_settings(ProbeSettings::from(&config))
            .with_stats(Arc::clone(&stats));

        let start_time = std::time::Instant::now();
        let resolved_count = Arc::new(AtomicUsize::new(0));
        let failed_count = Arc::new(AtomicUsize::new(0));

        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let resolved_for_logging = Arc::clone(&resolved_count);
        let failed_for_logging = Arc::clone(&failed_count);
        let logging_task = Some(tokio::task::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL));
            // First tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &resolved_for_logging, &failed_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let semaphore = init_semaphore(config.max_concurrency);
        let mut tasks = FuturesUnordered::new();
        let mut skipped = 0usize;

        for line in inputs {
            let Some(url) = validate_and_normalize_url(&line) else {
                skipped += 1;
                continue;
            };

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .context("Concurrency semaphore closed")?;
            let resolver = resolver.clone();
            let max_chain_length = config.max_chain_length;
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                let result = resolver.resolve(&url, max_chain_length).await;
                (url, result)
            }));
        }

        let mut records = Vec::new();
        let mut truncated = 0usize;
        while let Some(task_result) = tasks.next().await {
            let (url, result) = match task_result {
                Ok(done) => done,
                Err(join_error) => {
                    failed_count.fetch_add(1, Ordering::SeqCst);
                    warn!("Resolution task panicked: {:?}", join_error);
                    continue;
                }
            };

            match &result {
                Ok(resolved) => {
                    resolved_count.fetch_add(1, Ordering::SeqCst);
                    if resolved.truncated {
                        truncated += 1;
                    }
                }
                Err(e) => {
                    failed_count.fetch_add(1, Ordering::SeqCst);
                    warn!("Failed to resolve redirect chain for {url}: {e}");
                }
            }

            let record = ChainRecord::from_result(url.as_str(), &result);
            let line = record
                .render(config.output)
                .context("Failed to serialize result")?;
            writeln!(out, "{line}").context("Failed to write result")?;
            records.push(record);
        }
        out.flush().context("Failed to flush output")?;

        shutdown_gracefully(cancel, logging_task).await;

        let resolved = resolved_count.load(Ordering::SeqCst);
        let failed = failed_count.load(Ordering::SeqCst);
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        print_probe_statistics(&stats);

        Ok(ResolveReport {
            total_urls: resolved + failed,
            resolved,
            failed,
            truncated,
            skipped,
            elapsed_seconds,
            records,
        })
    }

    /// Gathers raw input lines from the configuration, a file, or stdin.
    async fn collect_inputs(config: &Config) -> Result<Vec<String>> {
        let mut inputs = config.urls.clone();

        match config.file.as_deref() {
            Some(path) if path.as_os_str() == "-" => {
                info!("Reading URLs from stdin");
                read_lines(BufReader::new(tokio::io::stdin()), &mut inputs).await?;
            }
            Some(path) => {
                read_file(path, &mut inputs).await?;
            }
            None if inputs.is_empty() => {
                info!("Reading URLs from stdin");
                read_lines(BufReader::new(tokio::io::stdin()), &mut inputs).await?;
            }
            None => {}
        }

        Ok(inputs)
    }

    async fn read_file(path: &Path, inputs: &mut Vec<String>) -> Result<()> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_lines(BufReader::new(file), inputs).await
    }

    async fn read_lines<R>(reader: R, inputs: &mut Vec<String>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            inputs.push(trimmed.to_string());
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_read_lines_skips_blanks_and_comments() {
            let input: &[u8] = b"https://a.example\n\n# comment\n   \n  b.example  \n";
            let mut inputs = Vec::new();
            read_lines(BufReader::new(input), &mut inputs)
                .await
                .expect("in-memory read");
            assert_eq!(inputs, vec!["https://a.example", "b.example"]);
        }

        #[tokio::test]
        async fn test_collect_inputs_uses_explicit_urls_without_stdin() {
            let config = Config {
                urls: vec!["https://a.example".to_string()],
                ..Default::default()
            };
            let inputs = collect_inputs(&config).await.expect("no I/O needed");
            assert_eq!(inputs, vec!["https://a.example"]);
        }

        #[tokio::test]
        async fn test_collect_inputs_missing_file_is_error() {
            let config = Config {
                urls: vec!["https://a.example".to_string()],
                file: Some("/nonexistent/redirect_chain/urls.txt".into()),
                ..Default::default()
            };
            let err = collect_inputs(&config)
                .await
                .expect_err("missing file should fail");
            assert!(err.to_string().contains("Failed to open input file"));
        }
    }
}
