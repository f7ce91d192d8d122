//! Mapping from lookup outcomes to [`LookupStatus`].
//!
//! [`classify`] is total: every outcome maps to exactly one status and
//! anything not explicitly recognized is `Unknown`.

use serde_json::{json, Value};

use super::response::RdapDomain;
use crate::error::SweepError;
use crate::types::LookupStatus;

/// Keep at most this many characters of a non-JSON body in the payload
const BODY_SNIPPET_CHARS: usize = 200;

/// What the lookup step observed for one candidate
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// Label failed local syntax checks; nothing was sent
    Rejected { reason: String },
    /// The service answered (any status code)
    Response { http_status: u16, body: String },
    /// No usable answer: timeout, connection error, exhausted retries
    Failed(SweepError),
}

impl LookupOutcome {
    pub fn http_status(&self) -> Option<u16> {
        match self {
            LookupOutcome::Response { http_status, .. } => Some(*http_status),
            _ => None,
        }
    }

    fn json_body(&self) -> Option<Value> {
        match self {
            LookupOutcome::Response { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Status codes the lookup service uses for each verdict.
///
/// Defaults follow the Verisign RDAP service for `.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRules {
    /// Codes meaning "no registration record" (also matched against `errorCode`)
    pub not_found: Vec<u16>,
    /// Codes meaning the query itself was rejected as malformed
    pub invalid: Vec<u16>,
    /// Codes worth another attempt before giving up
    pub retryable: Vec<u16>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            not_found: vec![404],
            invalid: vec![400, 422],
            retryable: vec![429, 500, 502, 503, 504],
        }
    }
}

impl ClassificationRules {
    pub fn is_retryable(&self, outcome: &LookupOutcome) -> bool {
        match outcome {
            LookupOutcome::Response { http_status, .. } => self.retryable.contains(http_status),
            LookupOutcome::Failed(err) => err.is_transient(),
            LookupOutcome::Rejected { .. } => false,
        }
    }
}

/// Classify a lookup outcome.
pub fn classify(outcome: &LookupOutcome, rules: &ClassificationRules) -> LookupStatus {
    let http_status = match outcome {
        LookupOutcome::Rejected { .. } => return LookupStatus::Invalid,
        LookupOutcome::Failed(_) => return LookupStatus::Unknown,
        LookupOutcome::Response { http_status, .. } => *http_status,
    };

    if rules.not_found.contains(&http_status) {
        return LookupStatus::Available;
    }
    if rules.invalid.contains(&http_status) {
        return LookupStatus::Invalid;
    }
    if !(200..300).contains(&http_status) {
        return LookupStatus::Unknown;
    }

    let Some(domain) = outcome.json_body().as_ref().and_then(RdapDomain::from_value) else {
        return LookupStatus::Unknown;
    };

    match domain.error_code {
        Some(code) if rules.not_found.contains(&code) => LookupStatus::Available,
        Some(code) if rules.invalid.contains(&code) => LookupStatus::Invalid,
        Some(_) => LookupStatus::Unknown,
        None if domain.has_registration_data() => LookupStatus::Registered,
        None => LookupStatus::Unknown,
    }
}

/// Structured payload recorded for an outcome.
///
/// JSON bodies are kept as-is; everything else becomes an error marker object.
pub fn raw_payload(outcome: &LookupOutcome) -> Value {
    match outcome {
        LookupOutcome::Rejected { reason } => json!({
            "error": format!("invalid label: {}", reason),
            "http_status": null,
        }),
        LookupOutcome::Failed(err) => json!({
            "error": err.to_string(),
            "http_status": null,
        }),
        LookupOutcome::Response { http_status, body } => match outcome.json_body() {
            Some(value) => value,
            None if body.trim().is_empty() => json!({
                "error": "empty response body",
                "http_status": http_status,
            }),
            None => json!({
                "error": "unparseable response body",
                "http_status": http_status,
                "body": body.chars().take(BODY_SNIPPET_CHARS).collect::<String>(),
            }),
        },
    }
}

/// One-line explanation of a classification for console output
pub fn describe(outcome: &LookupOutcome, status: LookupStatus) -> String {
    match (outcome, status) {
        (LookupOutcome::Rejected { reason }, _) => format!("invalid label: {}", reason),
        (LookupOutcome::Failed(err), _) => err.to_string(),
        (LookupOutcome::Response { .. }, LookupStatus::Available) => "not found".to_string(),
        (LookupOutcome::Response { .. }, LookupStatus::Registered) => {
            let domain = outcome.json_body().as_ref().and_then(RdapDomain::from_value);
            let name = domain
                .as_ref()
                .and_then(|d| d.ldh_name.clone())
                .unwrap_or_else(|| "registered".to_string());
            let mut detail = name;
            if let Some(registrar) = domain.as_ref().and_then(|d| d.registrar()) {
                detail.push_str(&format!(" via {}", registrar));
            }
            if let Some(expires) = domain.as_ref().and_then(|d| d.expiration()) {
                detail.push_str(&format!(", expires {}", expires.format("%Y-%m-%d")));
            }
            detail
        }
        (LookupOutcome::Response { http_status, .. }, LookupStatus::Invalid) => {
            format!("rejected by registry (http {})", http_status)
        }
        (LookupOutcome::Response { http_status, .. }, LookupStatus::Unknown) => {
            if (200..300).contains(http_status) {
                format!("unrecognized response (http {})", http_status)
            } else {
                format!("http {}", http_status)
            }
        }
    }
}
