//! Domain Sweep - bulk `.com` availability checks over RDAP
//!
//! Combines a list of prefixes with a list of suffixes, looks every
//! resulting domain up through the registry's RDAP service and reports each
//! one as available, registered, invalid or unknown.

pub mod cli;
pub mod domain;
pub mod error;
pub mod logger;
pub mod rdap;
pub mod report;
pub mod sweep;
pub mod types;
pub mod words;

// Re-export commonly used types
pub use error::{Result, SweepError};
pub use types::{
    Candidate, Charset, CheckConfig, LookupMetrics, LookupResult, LookupStatus, MetricsSnapshot,
    StatusCounts, SweepConfig,
};

// Re-export main functionality
pub use domain::{CandidateValidator, CombinationGenerator, DomainChecker};
pub use sweep::{Sweep, SweepProgress, SweepReport};
pub use words::{WordList, WordRole, WordSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
