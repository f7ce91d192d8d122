//! RDAP endpoint for the `.com` registry.

use crate::error::{Result, SweepError};

/// Verisign RDAP base URL for `.com`, including the version path.
pub const DEFAULT_RDAP_BASE: &str = "https://rdap.verisign.com/com/v1/";

/// Validate an RDAP base URL and make sure it ends with `/`.
pub fn normalize_base(base: &str) -> Result<String> {
    let trimmed = base.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| SweepError::config(format!("invalid RDAP URL '{}': {}", trimmed, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SweepError::config(format!(
            "RDAP URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Build the RDAP domain query URL (`<base>domain/<domain>`).
pub fn domain_url(base: &str, domain: &str) -> String {
    format!("{base}domain/{domain}")
}
