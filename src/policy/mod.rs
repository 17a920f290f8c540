//! Domain policy table.
//!
//! Some servers answer HEAD requests with non-standard or missing responses.
//! Probing them with HEAD wastes a round trip and can hide a redirect, so the
//! probe consults this table and goes straight to GET for listed hosts.
//!
//! Membership is an exact string match against [`Url::host_str`]: no subdomain
//! matching and no case folding. A table holding `"MEGA.NZ"` therefore never
//! matches a parsed URL, whose host the parser has already lowercased.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use reqwest::Url;

use crate::config::DEFAULT_NO_HEAD_DOMAINS;

static GLOBAL_POLICY: LazyLock<DomainPolicy> = LazyLock::new(DomainPolicy::default);

/// Mutable set of hostnames that must not receive a HEAD probe.
///
/// Cloning is cheap and every clone shares the same underlying set, so a
/// caller can keep a handle and mutate it while resolvers hold other clones.
/// Mutations made during an in-flight resolution become visible to later
/// lookups (last write wins); nothing stronger is guaranteed.
#[derive(Debug, Clone)]
pub struct DomainPolicy {
    hosts: Arc<RwLock<HashSet<String>>>,
}

impl Default for DomainPolicy {
    /// A new, isolated table seeded with [`DEFAULT_NO_HEAD_DOMAINS`].
    fn default() -> Self {
        Self::from_hosts(DEFAULT_NO_HEAD_DOMAINS.iter().copied())
    }
}

impl DomainPolicy {
    /// The process-wide table used by the free functions
    /// [`get_location_header`](crate::get_location_header) and
    /// [`get_redirect_chain`](crate::get_redirect_chain).
    pub fn global() -> DomainPolicy {
        GLOBAL_POLICY.clone()
    }

    /// An isolated table with no entries.
    pub fn empty() -> Self {
        Self::from_hosts(std::iter::empty::<String>())
    }

    /// An isolated table holding exactly `hosts`.
    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DomainPolicy {
            hosts: Arc::new(RwLock::new(hosts.into_iter().map(Into::into).collect())),
        }
    }

    /// Exact-match membership test.
    pub fn contains(&self, hostname: &str) -> bool {
        self.hosts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(hostname)
    }

    /// Whether `url` has a host listed in the table. URLs without a host never match.
    pub fn skips_head(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|host| self.contains(host))
    }

    /// Adds a hostname. Returns `false` if it was already present.
    pub fn insert(&self, hostname: impl Into<String>) -> bool {
        self.hosts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hostname.into())
    }

    /// Removes a hostname. Returns `false` if it was not present.
    pub fn remove(&self, hostname: &str) -> bool {
        self.hosts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(hostname)
    }

    /// Snapshot of the current entries, sorted.
    pub fn hostnames(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self
            .hosts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();
        hosts.sort();
        hosts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.hosts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The process-wide, externally mutable no-HEAD table.
///
/// Equivalent to [`DomainPolicy::global`].
pub fn no_head_request_domains() -> DomainPolicy {
    DomainPolicy::global()
}
