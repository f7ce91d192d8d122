//! Domain Sweep - bulk `.com` availability checks over RDAP
//!
//! Generates every prefix × suffix combination, checks each one against the
//! registry and prints a per-domain line plus a summary.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::process;

use domain_sweep::{
    cli::Args,
    logger,
    report::{render_result_line, render_summary},
    types::TLD,
    Result, Sweep, SweepError,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = domain_sweep::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args = Args::parse();
    logger::init_logger(args.verbose);
    tracing::debug!(?args, "Parsed arguments");

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "Sweep failed");
        eprintln!("{}", e.user_message());
        process::exit(e.exit_code());
    }
}

async fn run(args: Args) -> Result<()> {
    // Inputs and configuration are validated before the first request.
    let (prefixes, suffixes) = args.load_word_lists()?;
    let config = args.to_config()?;
    let sweep = Sweep::new(config)?;

    let total = (prefixes.len() as u64) * (suffixes.len() as u64);
    println!("Checking {} .{} domains via RDAP...", total, TLD);
    println!();

    let progress = progress_bar(total)?;
    let report = sweep
        .run(&prefixes, &suffixes, |p| {
            progress.suspend(|| println!("{}", render_result_line(p.result)));
            progress.set_position(p.current);
        })
        .await;
    progress.finish_and_clear();
    let report = report?;

    println!();
    print!(
        "{}",
        render_summary(
            &report.counts,
            report.output.as_deref(),
            report.elapsed,
            &report.metrics,
        )
    );

    // The summary is printed even when the report file could not be written.
    match report.export_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn progress_bar(total: u64) -> Result<ProgressBar> {
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} ({eta})")
        .map_err(|e| SweepError::internal(format!("progress template: {}", e)))?
        .progress_chars("=> ");
    Ok(ProgressBar::new(total).with_style(style))
}
