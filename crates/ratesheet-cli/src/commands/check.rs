use chrono::Utc;
use ratesheet_core::diff::{diff, summarize};
use ratesheet_core::error::RateError;
use ratesheet_core::report::{ChangeReport, IssueTracker};
use ratesheet_core::snapshot::load_snapshot;

use super::Context;
use crate::{InputArgs, SourceArgs};

/// Force-fetch the live sheet, compare it with the snapshot and optionally file an issue.
pub fn run(args: &SourceArgs, open_issue: bool) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    eprintln!("Using snapshot: {}", ctx.snapshot_path.display());

    let baseline = load_snapshot(&ctx.snapshot_path)?;
    let input = InputArgs {
        force: true,
        input: None,
        layout: false,
    };
    let current = summarize(&ctx.load_document(&input)?);
    let changes = diff(&current, &baseline.summary());

    if changes.is_empty() {
        println!("No rate changes detected. No issue will be created.");
        return Ok(());
    }

    let report = ChangeReport::build(
        &ctx.provider.utility,
        &changes,
        &ctx.snapshot_path,
        Utc::now(),
    );

    if !open_issue {
        println!("{}\n\n{}", report.title, report.body);
        return Ok(());
    }

    eprintln!("Rate changes detected; creating issue...");
    let tracker = IssueTracker::from_env(ctx.cache.config().timeout)?;
    tracker.create_issue(&report)?;
    println!("Issue created: {}", report.title);

    Ok(())
}
