//! Command-line arguments and their translation into library configuration

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::rdap::{normalize_base, DEFAULT_RDAP_BASE};
use crate::types::{Charset, CheckConfig, SweepConfig};
use crate::words::{WordList, WordRole, WordSource};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "domain-sweep",
    version,
    about = "Check prefix × suffix .com combinations for availability via RDAP"
)]
pub struct Args {
    /// Comma-separated prefixes, e.g. quick,smart
    #[arg(long, value_name = "LIST")]
    pub prefixes: Option<String>,

    /// File with one prefix per line
    #[arg(long, value_name = "PATH")]
    pub prefix_file: Option<PathBuf>,

    /// Comma-separated suffixes, e.g. pay,bank
    #[arg(long, value_name = "LIST")]
    pub suffixes: Option<String>,

    /// File with one suffix per line
    #[arg(long, value_name = "PATH")]
    pub suffix_file: Option<PathBuf>,

    /// Write the CSV report here
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// RDAP base URL
    #[arg(long, env = "DOMAIN_SWEEP_RDAP_URL", default_value = DEFAULT_RDAP_BASE)]
    pub rdap_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "DOMAIN_SWEEP_TIMEOUT_SECS",
        default_value_t = 8,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Extra attempts after a transient failure (0 disables retrying)
    #[arg(long, env = "DOMAIN_SWEEP_RETRIES", default_value_t = 2)]
    pub retries: u32,

    /// Base backoff between attempts, in milliseconds
    #[arg(long, default_value_t = 750)]
    pub backoff_ms: u64,

    /// Pause after each lookup, in milliseconds
    #[arg(long, env = "DOMAIN_SWEEP_DELAY_MS", default_value_t = 200)]
    pub delay_ms: u64,

    /// Accept digits in labels
    #[arg(long)]
    pub allow_digits: bool,

    /// Drop repeated prefixes and suffixes
    #[arg(long)]
    pub dedupe: bool,

    /// Warn when the number of combinations exceeds this
    #[arg(long, default_value_t = 10_000)]
    pub warn_threshold: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the sweep configuration, validating the RDAP base URL.
    pub fn to_config(&self) -> Result<SweepConfig> {
        let charset = if self.allow_digits {
            Charset::Alphanumeric
        } else {
            Charset::Letters
        };

        let check = CheckConfig {
            rdap_base: normalize_base(&self.rdap_url)?,
            timeout: Duration::from_secs(self.timeout_secs),
            max_attempts: self.retries.saturating_add(1),
            retry_backoff: Duration::from_millis(self.backoff_ms),
            request_delay: Duration::from_millis(self.delay_ms),
            charset,
            ..CheckConfig::default()
        };

        Ok(SweepConfig {
            check,
            output: self.out.clone(),
            warn_threshold: self.warn_threshold,
        })
    }

    /// Resolve and load both word lists.
    ///
    /// Runs before any network activity so source errors fail fast.
    pub fn load_word_lists(&self) -> Result<(WordList, WordList)> {
        let prefixes = self.load_role(
            self.prefixes.clone(),
            self.prefix_file.clone(),
            WordRole::Prefixes,
        )?;
        let suffixes = self.load_role(
            self.suffixes.clone(),
            self.suffix_file.clone(),
            WordRole::Suffixes,
        )?;
        Ok((prefixes, suffixes))
    }

    fn load_role(
        &self,
        inline: Option<String>,
        file: Option<PathBuf>,
        role: WordRole,
    ) -> Result<WordList> {
        let list = WordSource::resolve(inline, file, role)?.load(role)?;
        Ok(if self.dedupe { list.dedupe() } else { list })
    }
}
