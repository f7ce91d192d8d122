//! RDAP protocol knowledge: endpoint layout, response model and classification.
//!
//! Everything that depends on how the registry answers lives here, so the
//! checker only moves bytes and the classifier only looks at outcomes.

pub mod classify;
pub mod registry;
pub mod response;

pub use classify::{classify, ClassificationRules, LookupOutcome};
pub use registry::{domain_url, normalize_base, DEFAULT_RDAP_BASE};
pub use response::RdapDomain;

/// Raw HTTP answer from the RDAP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdapReply {
    pub http_status: u16,
    pub body: String,
}
