//! Candidate generation and availability checking

pub mod checker;
pub mod generator;
pub mod validator;

// Re-export main functionality
pub use checker::{DomainChecker, RdapClient};
pub use generator::CombinationGenerator;
pub use validator::CandidateValidator;

use crate::error::Result;
use crate::rdap::RdapReply;
use async_trait::async_trait;

/// Transport used by the checker to query the lookup service
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Query the service for one domain.
    ///
    /// Any HTTP status is a successful reply; errors mean no usable answer
    /// arrived (timeout, connection failure, unreadable body).
    async fn fetch(&self, domain: &str) -> Result<RdapReply>;

    /// Identifier of the source consulted for `domain`
    fn source_for(&self, domain: &str) -> String;
}
