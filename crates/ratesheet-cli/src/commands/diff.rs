use ratesheet_core::diff::render::{render_markdown, render_text};
use ratesheet_core::diff::{diff, summarize};
use ratesheet_core::error::RateError;
use ratesheet_core::snapshot::load_snapshot;

use super::Context;
use crate::{InputArgs, SourceArgs};

pub fn run(args: &SourceArgs, input: &InputArgs, format: &str) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let baseline = load_snapshot(&ctx.snapshot_path)?;
    let current = summarize(&ctx.load_document(input)?);

    let changes = diff(&current, &baseline.summary());
    tracing::info!(changes = changes.len(), "compared against snapshot");

    match format {
        "markdown" | "md" => println!("{}", render_markdown(&changes)),
        _ => println!("{}", render_text(&changes)),
    }

    Ok(())
}
