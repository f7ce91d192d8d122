//! Domain availability checker

use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};

use super::LookupBackend;
use crate::error::{Result, SweepError};
use crate::rdap::classify::{classify, describe, raw_payload, LookupOutcome};
use crate::rdap::registry::{domain_url, normalize_base};
use crate::rdap::RdapReply;
use crate::types::{Candidate, CheckConfig, LookupMetrics, LookupResult, MetricsSnapshot};

/// Upper bound on the backoff exponent
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Checks candidates one at a time and turns every outcome into a [`LookupResult`]
pub struct DomainChecker {
    config: CheckConfig,
    backend: Box<dyn LookupBackend>,
    metrics: LookupMetrics,
}

impl DomainChecker {
    /// Create a checker that queries RDAP over HTTP
    pub fn new(config: CheckConfig) -> Result<Self> {
        let client = RdapClient::new(&config)?;
        Ok(Self::with_backend(config, Box::new(client)))
    }

    /// Create a checker over a custom backend
    pub fn with_backend(config: CheckConfig, backend: Box<dyn LookupBackend>) -> Self {
        Self {
            config,
            backend,
            metrics: LookupMetrics::new(),
        }
    }

    /// Check a single candidate. Never fails: problems become `invalid` or `unknown`.
    pub async fn check_candidate(&self, candidate: &Candidate) -> LookupResult {
        let start_time = Instant::now();

        let (outcome, attempts, rdap_source) = match &candidate.rejection {
            Some(reason) => {
                tracing::debug!(domain = %candidate.domain, reason = %reason, "Candidate rejected locally");
                let outcome = LookupOutcome::Rejected {
                    reason: reason.clone(),
                };
                (outcome, 0, String::new())
            }
            None => {
                let (outcome, attempts) = self.lookup_with_retry(&candidate.domain).await;
                (outcome, attempts, self.backend.source_for(&candidate.domain))
            }
        };

        let status = classify(&outcome, &self.config.rules);
        let duration = start_time.elapsed();

        if attempts > 0 {
            self.metrics.increment_lookups();
            self.metrics.add_lookup_time(duration.as_millis() as u64);
            if matches!(outcome, LookupOutcome::Failed(_)) {
                self.metrics.increment_failures();
            }
        }

        tracing::debug!(
            domain = %candidate.domain,
            status = %status,
            http_status = ?outcome.http_status(),
            attempts = attempts,
            duration_ms = %duration.as_millis(),
            "Domain check completed"
        );

        LookupResult {
            domain: candidate.domain.clone(),
            status,
            rdap_source,
            raw_response: raw_payload(&outcome),
            http_status: outcome.http_status(),
            detail: describe(&outcome, status),
            attempts,
            checked_at: Utc::now(),
        }
    }

    /// Query the backend, retrying transient failures with exponential backoff
    async fn lookup_with_retry(&self, domain: &str) -> (LookupOutcome, u32) {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.metrics.increment_requests();

            let outcome = match self.backend.fetch(domain).await {
                Ok(reply) => LookupOutcome::Response {
                    http_status: reply.http_status,
                    body: reply.body,
                },
                Err(e) => LookupOutcome::Failed(e),
            };

            if attempt >= max_attempts || !self.config.rules.is_retryable(&outcome) {
                if attempt > 1 && self.config.rules.is_retryable(&outcome) {
                    tracing::warn!(domain = %domain, attempts = attempt, "Giving up after retries");
                }
                return (outcome, attempt);
            }

            let wait = self.backoff_for(attempt);
            tracing::debug!(
                domain = %domain,
                attempt = attempt,
                http_status = ?outcome.http_status(),
                wait_ms = %wait.as_millis(),
                "Transient lookup failure, retrying"
            );
            self.metrics.increment_retries();
            if !wait.is_zero() {
                sleep(wait).await;
            }
        }
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.config.retry_backoff.saturating_mul(1 << shift)
    }

    /// Get current metrics snapshot
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// RDAP client for domain checking
pub struct RdapClient {
    client: Client,
    base: String,
    timeout: Duration,
}

impl RdapClient {
    pub fn new(config: &CheckConfig) -> Result<Self> {
        let base = normalize_base(&config.rdap_base)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SweepError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            timeout: config.timeout,
        })
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    fn request_error(&self, err: reqwest::Error, url: &str) -> SweepError {
        if err.is_timeout() {
            SweepError::timeout("RDAP request", self.timeout_ms())
        } else {
            SweepError::network(err.to_string(), None, Some(url.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl LookupBackend for RdapClient {
    async fn fetch(&self, domain: &str) -> Result<RdapReply> {
        let url = domain_url(&self.base, domain);

        let request = async {
            let response = self
                .client
                .get(&url)
                .header(ACCEPT, "application/rdap+json, application/json")
                .send()
                .await
                .map_err(|e| self.request_error(e, &url))?;

            let http_status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| self.request_error(e, &url))?;

            Ok::<_, SweepError>(RdapReply { http_status, body })
        };

        timeout(self.timeout, request)
            .await
            .map_err(|_| SweepError::timeout("RDAP request", self.timeout_ms()))?
    }

    fn source_for(&self, domain: &str) -> String {
        domain_url(&self.base, domain)
    }
}
