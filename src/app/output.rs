//! Rendering of per-URL results.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error_handling::ChainError;
use crate::fetch::ResolvedChain;

/// One line of output: the resolved chain of a URL or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainRecord {
    /// Input URL (normalized)
    pub url: String,
    /// Visited URLs in order; empty when resolution failed
    pub chain: Vec<String>,
    /// Last URL of the chain
    pub final_url: Option<String>,
    /// Number of redirects followed
    pub hops: usize,
    /// Whether the chain stopped at the length cap
    pub truncated: bool,
    /// Failure message when resolution failed
    pub error: Option<String>,
}

impl ChainRecord {
    /// Builds a record from a resolution result.
    pub fn from_result(url: &str, result: &Result<ResolvedChain, ChainError>) -> Self {
        match result {
            Ok(resolved) => ChainRecord {
                url: url.to_string(),
                chain: resolved.urls.iter().map(|u| u.to_string()).collect(),
                final_url: resolved.final_url().map(|u| u.to_string()),
                hops: resolved.hops(),
                truncated: resolved.truncated,
                error: None,
            },
            Err(e) => ChainRecord {
                url: url.to_string(),
                chain: Vec::new(),
                final_url: None,
                hops: 0,
                truncated: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Renders the record as a single output line (without trailing newline).
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if JSONL serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Jsonl => serde_json::to_string(self),
            OutputFormat::Plain => Ok(match &self.error {
                Some(error) => format!("{} !! {}", self.url, error),
                None if self.chain.is_empty() => self.url.clone(),
                None => {
                    let line = self.chain.join(" -> ");
                    if self.truncated {
                        format!("{line} (truncated)")
                    } else {
                        line
                    }
                }
            }),
        }
    }
}
