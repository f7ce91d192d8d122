//! Label syntax checks for generated candidates

use regex::Regex;

use crate::error::{Result, SweepError};
use crate::types::Charset;

/// Maximum length of a single DNS label
pub const MAX_LABEL_LEN: usize = 63;
/// Maximum length of a full domain name
pub const MAX_DOMAIN_LEN: usize = 253;

/// Validates the second-level label of a candidate
#[derive(Debug, Clone)]
pub struct CandidateValidator {
    charset: Charset,
    allowed: Regex,
}

impl CandidateValidator {
    /// Create a validator accepting the given character set plus internal hyphens
    pub fn new(charset: Charset) -> Result<Self> {
        let pattern = match charset {
            Charset::Letters => r"^[a-z-]+$",
            Charset::Alphanumeric => r"^[a-z0-9-]+$",
        };
        let allowed = Regex::new(pattern).map_err(|e| SweepError::internal(e.to_string()))?;
        Ok(Self { charset, allowed })
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Validate a label (the part before `.com`)
    pub fn validate_label(&self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(SweepError::validation("label is empty"));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(SweepError::validation(format!(
                "label too long ({} > {} characters)",
                label.len(),
                MAX_LABEL_LEN
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(SweepError::validation("label cannot start or end with hyphen"));
        }

        if label.contains("--") {
            return Err(SweepError::validation("label cannot contain consecutive hyphens"));
        }

        if !self.allowed.is_match(label) {
            let offending = label
                .chars()
                .find(|c| *c != '-' && !self.charset.allows(*c))
                .map(|c| format!(" '{}'", c.escape_default()))
                .unwrap_or_default();
            return Err(SweepError::validation(format!(
                "label contains disallowed character{}",
                offending
            )));
        }

        Ok(())
    }

    /// Validate a full candidate domain (`<label>.<tld>`)
    pub fn validate(&self, domain: &str) -> Result<()> {
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(SweepError::validation(format!(
                "domain too long (max {} characters)",
                MAX_DOMAIN_LEN
            )));
        }

        let label = domain
            .rsplit_once('.')
            .map(|(label, _)| label)
            .ok_or_else(|| SweepError::validation("domain has no TLD"))?;
        self.validate_label(label)
    }

    /// Rejection reason for a domain, or `None` when it is well formed
    pub fn rejection(&self, domain: &str) -> Option<String> {
        match self.validate(domain) {
            Ok(()) => None,
            Err(SweepError::Validation { message }) => Some(message),
            Err(other) => Some(other.to_string()),
        }
    }
}
