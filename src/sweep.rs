//! End-to-end run: generate candidates, look each one up, export the report.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::time::sleep;

use crate::domain::{CandidateValidator, CombinationGenerator, DomainChecker};
use crate::error::{Result, SweepError};
use crate::report;
use crate::types::{LookupResult, MetricsSnapshot, StatusCounts, SweepConfig};
use crate::words::WordList;

/// Progress notification for one finished candidate
#[derive(Debug)]
pub struct SweepProgress<'a> {
    /// 1-based position of this result
    pub current: u64,
    pub total: u64,
    pub result: &'a LookupResult,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// One result per candidate, in generation order
    pub results: Vec<LookupResult>,
    pub counts: StatusCounts,
    /// Report file, when one was requested and written
    pub output: Option<PathBuf>,
    /// Set when the report file could not be written at the end of the run
    pub export_error: Option<SweepError>,
    pub elapsed: Duration,
    pub metrics: MetricsSnapshot,
}

/// Sequential sweep over all prefix × suffix candidates
pub struct Sweep {
    config: SweepConfig,
    checker: DomainChecker,
}

impl Sweep {
    /// Create a sweep that queries RDAP over HTTP
    pub fn new(config: SweepConfig) -> Result<Self> {
        let checker = DomainChecker::new(config.check.clone())?;
        Ok(Self { config, checker })
    }

    /// Create a sweep over an existing checker
    pub fn with_checker(config: SweepConfig, checker: DomainChecker) -> Self {
        Self { config, checker }
    }

    /// Run the sweep, calling `on_result` after every candidate.
    ///
    /// The output path is checked before the first lookup. After that nothing
    /// aborts the run: per-domain failures become results and a failed report
    /// write is returned in [`SweepReport::export_error`].
    pub async fn run<F>(
        &self,
        prefixes: &WordList,
        suffixes: &WordList,
        mut on_result: F,
    ) -> Result<SweepReport>
    where
        F: FnMut(&SweepProgress<'_>),
    {
        let start_time = Instant::now();
        let validator = CandidateValidator::new(self.config.check.charset)?;
        let generator = CombinationGenerator::new(prefixes, suffixes, validator);
        let total = generator.total();

        if let Some(path) = &self.config.output {
            report::prepare_output(path)?;
        }

        if total > self.config.warn_threshold {
            tracing::warn!(
                candidates = total,
                threshold = self.config.warn_threshold,
                "Large number of combinations; this run will take a while"
            );
        }
        tracing::info!(
            prefixes = prefixes.len(),
            suffixes = suffixes.len(),
            candidates = total,
            "Starting sweep"
        );

        let delay = self.config.check.request_delay;
        let mut results = Vec::new();
        let mut counts = StatusCounts::default();

        for candidate in generator {
            let result = self.checker.check_candidate(&candidate).await;
            counts.record(result.status);
            results.push(result);

            let current = candidate.index + 1;
            if let Some(result) = results.last() {
                on_result(&SweepProgress {
                    current,
                    total,
                    result,
                });
            }

            // Only pause between real requests.
            if !candidate.is_rejected() && current < total && !delay.is_zero() {
                sleep(delay).await;
            }
        }

        let (output, export_error) = match &self.config.output {
            Some(path) => match report::write_report(path, &results) {
                Ok(_) => (Some(path.clone()), None),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to write report");
                    (None, Some(e))
                }
            },
            None => (None, None),
        };

        let elapsed = start_time.elapsed();
        let metrics = self.checker.get_metrics_snapshot();
        tracing::info!(
            total = counts.total,
            available = counts.available,
            registered = counts.registered,
            invalid = counts.invalid,
            unknown = counts.unknown,
            elapsed_ms = %elapsed.as_millis(),
            "Sweep completed"
        );

        Ok(SweepReport {
            results,
            counts,
            output,
            export_error,
            elapsed,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LookupBackend;
    use crate::rdap::RdapReply;
    use crate::types::{CheckConfig, LookupStatus};
    use crate::words::WordRole;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Backend answering from a fixed table; unlisted domains time out
    struct TableBackend {
        replies: HashMap<String, u16>,
    }

    #[async_trait::async_trait]
    impl LookupBackend for TableBackend {
        async fn fetch(&self, domain: &str) -> crate::error::Result<RdapReply> {
            match self.replies.get(domain) {
                Some(200) => Ok(RdapReply {
                    http_status: 200,
                    body: format!(
                        r#"{{"objectClassName":"domain","ldhName":"{}"}}"#,
                        domain.to_uppercase()
                    ),
                }),
                Some(code) => Ok(RdapReply {
                    http_status: *code,
                    body: String::new(),
                }),
                None => Err(SweepError::timeout("RDAP request", 10)),
            }
        }

        fn source_for(&self, domain: &str) -> String {
            format!("table://{}", domain)
        }
    }

    fn fast_config(output: Option<PathBuf>) -> SweepConfig {
        SweepConfig {
            check: CheckConfig {
                max_attempts: 1,
                retry_backoff: Duration::ZERO,
                request_delay: Duration::ZERO,
                ..CheckConfig::default()
            },
            output,
            ..SweepConfig::default()
        }
    }

    fn sweep_with(replies: &[(&str, u16)], config: SweepConfig) -> Sweep {
        let backend = TableBackend {
            replies: replies.iter().map(|(d, c)| (d.to_string(), *c)).collect(),
        };
        let checker = DomainChecker::with_backend(config.check.clone(), Box::new(backend));
        Sweep::with_checker(config, checker)
    }

    fn sweep(replies: &[(&str, u16)], output: Option<PathBuf>) -> Sweep {
        sweep_with(replies, fast_config(output))
    }

    /// Log sink shared between a test and its subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn words(role: WordRole, tokens: &[&str]) -> WordList {
        WordList::new(role, tokens).unwrap()
    }

    #[tokio::test]
    async fn test_quick_smart_scenario() {
        let sweep = sweep(
            &[
                ("quickpay.com", 200),
                ("quickbank.com", 404),
                ("smartpay.com", 404),
                ("smartbank.com", 200),
            ],
            None,
        );
        let prefixes = words(WordRole::Prefixes, &["quick", "smart"]);
        let suffixes = words(WordRole::Suffixes, &["pay", "bank"]);

        let mut seen = Vec::new();
        let report = sweep
            .run(&prefixes, &suffixes, |p| seen.push((p.current, p.total)))
            .await
            .unwrap();

        assert_eq!(
            report.counts,
            StatusCounts {
                total: 4,
                available: 2,
                registered: 2,
                invalid: 0,
                unknown: 0
            }
        );
        assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        let statuses: Vec<LookupStatus> = report.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                LookupStatus::Registered,
                LookupStatus::Available,
                LookupStatus::Available,
                LookupStatus::Registered
            ]
        );
        assert!(report.output.is_none());
    }

    #[tokio::test]
    async fn test_one_timeout_among_five() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let sweep = sweep(
            &[
                ("alphaone.com", 404),
                ("betaone.com", 200),
                ("deltaone.com", 404),
                ("echoone.com", 200),
            ],
            Some(path.clone()),
        );
        let prefixes = words(WordRole::Prefixes, &["alpha", "beta", "gamma", "delta", "echo"]);
        let suffixes = words(WordRole::Suffixes, &["one"]);

        let report = sweep.run(&prefixes, &suffixes, |_| {}).await.unwrap();

        assert_eq!(report.counts.total, 5);
        assert_eq!(report.counts.unknown, 1);
        assert_eq!(report.results[2].domain, "gammaone.com");
        assert_eq!(report.results[2].status, LookupStatus::Unknown);
        assert_eq!(report.counts.classified(), report.counts.total);

        let rows = report::read_report(&path).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2].status, LookupStatus::Unknown);
    }

    #[tokio::test]
    async fn test_digit_prefix_is_invalid_without_lookup() {
        let sweep = sweep(&[("fastpay.com", 404)], None);
        let prefixes = words(WordRole::Prefixes, &["WEB3", "fast"]);
        let suffixes = words(WordRole::Suffixes, &["pay"]);

        let report = sweep.run(&prefixes, &suffixes, |_| {}).await.unwrap();

        assert_eq!(report.results[0].domain, "web3pay.com");
        assert_eq!(report.results[0].status, LookupStatus::Invalid);
        assert_eq!(report.results[0].attempts, 0);
        assert_eq!(report.results[1].status, LookupStatus::Available);
        assert_eq!(report.metrics.lookups, 1);
    }

    #[tokio::test]
    async fn test_repeat_runs_are_stable() {
        let sweep = sweep(&[("gopay.com", 200), ("gobank.com", 404)], None);
        let prefixes = words(WordRole::Prefixes, &["go"]);
        let suffixes = words(WordRole::Suffixes, &["pay", "bank", "cash"]);

        let first = sweep.run(&prefixes, &suffixes, |_| {}).await.unwrap();
        let second = sweep.run(&prefixes, &suffixes, |_| {}).await.unwrap();

        let statuses = |r: &SweepReport| r.results.iter().map(|x| x.status).collect::<Vec<_>>();
        assert_eq!(statuses(&first), statuses(&second));
        assert_eq!(first.counts, second.counts);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_skips_rejected_and_last_candidates() {
        let mut config = fast_config(None);
        config.check.request_delay = Duration::from_secs(1);
        let sweep = sweep_with(
            &[
                ("alphaone.com", 404),
                ("betaone.com", 404),
                ("deltaone.com", 404),
            ],
            config,
        );
        // alpha and beta pause; g4mma is rejected locally; delta is last
        let prefixes = words(WordRole::Prefixes, &["alpha", "beta", "g4mma", "delta"]);
        let suffixes = words(WordRole::Suffixes, &["one"]);

        let start = tokio::time::Instant::now();
        let report = sweep.run(&prefixes, &suffixes, |_| {}).await.unwrap();
        let waited = start.elapsed();

        assert_eq!(report.counts.invalid, 1);
        assert!(waited >= Duration::from_secs(2), "waited {:?}", waited);
        assert!(waited < Duration::from_secs(3), "waited {:?}", waited);
    }

    #[tokio::test]
    async fn test_warns_when_product_exceeds_threshold() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let prefixes = words(WordRole::Prefixes, &["go", "get"]);
        let suffixes = words(WordRole::Suffixes, &["pay", "bank"]);

        let at_limit = SweepConfig {
            warn_threshold: 4,
            ..fast_config(None)
        };
        sweep_with(&[], at_limit)
            .run(&prefixes, &suffixes, |_| {})
            .await
            .unwrap();
        assert!(!logs.contents().contains("Large number of combinations"));

        let over_limit = SweepConfig {
            warn_threshold: 3,
            ..fast_config(None)
        };
        let report = sweep_with(&[], over_limit)
            .run(&prefixes, &suffixes, |_| {})
            .await
            .unwrap();
        assert!(logs.contents().contains("Large number of combinations"));
        // the warning does not limit the run
        assert_eq!(report.results.len(), 4);
    }

    #[tokio::test]
    async fn test_unusable_output_fails_before_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "x").unwrap();

        let sweep = sweep(&[("gopay.com", 404)], Some(blocker.join("results.csv")));
        let prefixes = words(WordRole::Prefixes, &["go"]);
        let suffixes = words(WordRole::Suffixes, &["pay"]);

        let mut seen = 0;
        let err = sweep
            .run(&prefixes, &suffixes, |_| seen += 1)
            .await
            .unwrap_err();

        assert!(matches!(err, SweepError::Config { .. }));
        assert_eq!(seen, 0);
    }

    #[tokio::test]
    async fn test_failed_report_write_keeps_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let sweep = sweep(&[("gopay.com", 404), ("gobank.com", 200)], Some(path.clone()));
        let prefixes = words(WordRole::Prefixes, &["go"]);
        let suffixes = words(WordRole::Suffixes, &["pay", "bank"]);

        // Replace the prepared file with a directory once lookups have started.
        let report = sweep
            .run(&prefixes, &suffixes, |p| {
                if p.current == 1 {
                    std::fs::remove_file(&path).unwrap();
                    std::fs::create_dir(&path).unwrap();
                }
            })
            .await
            .unwrap();

        assert!(matches!(report.export_error, Some(SweepError::Csv { .. })));
        assert!(report.output.is_none());
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.counts.total, 2);
    }
}
