//! Console output

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::types::{LookupResult, LookupStatus, MetricsSnapshot, StatusCounts};

/// Per-domain progress line, e.g. `quickpay.com  -> REGISTERED  (QUICKPAY.COM)`
pub fn render_result_line(result: &LookupResult) -> String {
    format!(
        "{:35}  -> {}  ({})",
        result.domain,
        result.status.as_str().to_uppercase(),
        result.detail
    )
}

/// Final summary block
pub fn render_summary(
    counts: &StatusCounts,
    output: Option<&Path>,
    elapsed: Duration,
    metrics: &MetricsSnapshot,
) -> String {
    Summary {
        counts,
        output,
        elapsed,
        metrics,
    }
    .to_string()
}

struct Summary<'a> {
    counts: &'a StatusCounts,
    output: Option<&'a Path>,
    elapsed: Duration,
    metrics: &'a MetricsSnapshot,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary")?;
        writeln!(f, "-------")?;
        writeln!(f, "{:<12}{}", "Total:", self.counts.total)?;
        for status in LookupStatus::ALL {
            let label = format!("{}:", capitalize(status.as_str()));
            writeln!(f, "{:<12}{}", label, self.counts.get(status))?;
        }

        writeln!(f)?;
        writeln!(f, "Elapsed:    {:.2}s", self.elapsed.as_secs_f64())?;
        if self.metrics.lookups > 0 {
            writeln!(f, "Avg lookup: {:.1}ms", self.metrics.avg_lookup_time_ms())?;
        }
        if self.metrics.retries > 0 {
            writeln!(f, "Retries:    {}", self.metrics.retries)?;
        }

        if let Some(path) = self.output {
            writeln!(f)?;
            writeln!(f, "Saved CSV:  {}", path.display())?;
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
