use chrono::Utc;
use ratesheet_core::diff::summarize;
use ratesheet_core::error::RateError;
use ratesheet_core::snapshot::{load_snapshot, save_snapshot, Snapshot};

use super::Context;
use crate::output;
use crate::{InputArgs, SourceArgs};

pub fn update(args: &SourceArgs, input: &InputArgs, label: Option<&str>) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let summary = summarize(&ctx.load_document(input)?);

    for (kind, section) in summary.sections() {
        let missing: Vec<&str> = section
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field.as_str())
            .collect();
        if !missing.is_empty() {
            eprintln!("  warning: {kind} has no value for {}", missing.join(", "));
        }
    }

    let snapshot = Snapshot::from_summary(summary, label, Utc::now());
    save_snapshot(&ctx.snapshot_path, &snapshot)?;
    println!("Snapshot written to {}", ctx.snapshot_path.display());

    Ok(())
}

pub fn show(args: &SourceArgs) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let snapshot = load_snapshot(&ctx.snapshot_path)?;
    output::json::print(&snapshot)
}
