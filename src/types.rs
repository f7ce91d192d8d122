//! Core types and structures for domain-sweep

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::rdap::classify::ClassificationRules;
use crate::rdap::registry::DEFAULT_RDAP_BASE;

/// Top-level domain every candidate is generated under
pub const TLD: &str = "com";

/// Lookup status of a candidate domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Available,
    Registered,
    Invalid,
    Unknown,
}

impl LookupStatus {
    /// All statuses in report order
    pub const ALL: [LookupStatus; 4] = [
        LookupStatus::Available,
        LookupStatus::Registered,
        LookupStatus::Invalid,
        LookupStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Available => "available",
            LookupStatus::Registered => "registered",
            LookupStatus::Invalid => "invalid",
            LookupStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character set accepted in generated labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Only lowercase letters (a-z)
    #[default]
    Letters,
    /// Letters and digits (a-z, 0-9)
    Alphanumeric,
}

impl Charset {
    pub fn allows(&self, c: char) -> bool {
        match self {
            Charset::Letters => c.is_ascii_lowercase(),
            Charset::Alphanumeric => c.is_ascii_lowercase() || c.is_ascii_digit(),
        }
    }
}

/// A generated domain name awaiting lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in generation order
    pub index: u64,
    pub prefix: String,
    pub suffix: String,
    /// Full domain, e.g. `quickpay.com`
    pub domain: String,
    /// Set when the label failed syntax validation; such candidates are never sent to RDAP
    pub rejection: Option<String>,
}

impl Candidate {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Result of looking up one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResult {
    pub domain: String,
    pub status: LookupStatus,
    /// RDAP query URL consulted; empty when no lookup was made
    pub rdap_source: String,
    /// Structured response payload, or an error marker object
    pub raw_response: serde_json::Value,
    pub http_status: Option<u16>,
    /// Short human readable explanation for console output
    pub detail: String,
    pub attempts: u32,
    pub checked_at: DateTime<Utc>,
}

/// Configuration for domain checking
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// RDAP base URL, ending with `/`
    pub rdap_base: String,
    /// Per-request timeout covering send and body read
    pub timeout: Duration,
    /// Maximum attempts per candidate (at least 1)
    pub max_attempts: u32,
    /// Base delay for exponential backoff between attempts
    pub retry_backoff: Duration,
    /// Pause after each network lookup
    pub request_delay: Duration,
    pub charset: Charset,
    pub rules: ClassificationRules,
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rdap_base: DEFAULT_RDAP_BASE.to_string(),
            timeout: Duration::from_secs(8),
            max_attempts: 3,
            retry_backoff: Duration::from_millis(750),
            request_delay: Duration::from_millis(200),
            charset: Charset::Letters,
            rules: ClassificationRules::default(),
            user_agent: format!("domain-sweep/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Configuration for a full sweep run
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub check: CheckConfig,
    /// CSV destination; `None` prints the summary only
    pub output: Option<PathBuf>,
    /// Warn when prefixes × suffixes exceeds this many candidates
    pub warn_threshold: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            check: CheckConfig::default(),
            output: None,
            warn_threshold: 10_000,
        }
    }
}

/// Per-status tallies of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: u64,
    pub available: u64,
    pub registered: u64,
    pub invalid: u64,
    pub unknown: u64,
}

impl StatusCounts {
    pub fn from_results(results: &[LookupResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.record(result.status);
        }
        counts
    }

    pub fn record(&mut self, status: LookupStatus) {
        self.total += 1;
        match status {
            LookupStatus::Available => self.available += 1,
            LookupStatus::Registered => self.registered += 1,
            LookupStatus::Invalid => self.invalid += 1,
            LookupStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, status: LookupStatus) -> u64 {
        match status {
            LookupStatus::Available => self.available,
            LookupStatus::Registered => self.registered,
            LookupStatus::Invalid => self.invalid,
            LookupStatus::Unknown => self.unknown,
        }
    }

    /// Sum of the per-status counts; always equals `total`
    pub fn classified(&self) -> u64 {
        self.available + self.registered + self.invalid + self.unknown
    }
}

/// Lookup performance counters
#[derive(Debug, Default)]
pub struct LookupMetrics {
    lookups: AtomicU64,
    requests: AtomicU64,
    retries: AtomicU64,
    failures: AtomicU64,
    total_lookup_ms: AtomicU64,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_retries(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_lookup_time(&self, ms: u64) {
        self.total_lookup_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            total_lookup_ms: self.total_lookup_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`LookupMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Candidates sent to the lookup service
    pub lookups: u64,
    /// HTTP requests issued, retries included
    pub requests: u64,
    pub retries: u64,
    /// Lookups that ended without a usable response
    pub failures: u64,
    pub total_lookup_ms: u64,
}

impl MetricsSnapshot {
    pub fn avg_lookup_time_ms(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.total_lookup_ms as f64 / self.lookups as f64
        }
    }
}
