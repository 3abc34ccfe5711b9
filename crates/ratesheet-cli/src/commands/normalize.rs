use chrono::Utc;
use ratesheet_core::error::RateError;
use ratesheet_core::normalize::normalize_at;
use std::path::PathBuf;

use super::Context;
use crate::output;
use crate::{InputArgs, SourceArgs};

pub fn run(
    args: &SourceArgs,
    input: &InputArgs,
    output_file: Option<PathBuf>,
) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let parsed = ctx.load_document(input)?;

    // A cached download is stamped with its download time, not the time of this run.
    let fetched_at = match input.input {
        Some(_) => Utc::now(),
        None => ctx
            .cache
            .read_metadata()?
            .map(|meta| meta.fetched_at)
            .unwrap_or_else(Utc::now),
    };
    let record = normalize_at(&parsed, &ctx.provider, fetched_at);

    match output_file {
        Some(path) => {
            std::fs::write(&path, serde_json::to_string_pretty(&record)?)?;
            eprintln!("Normalized record written to {}", path.display());
        }
        None => output::json::print(&record)?,
    }

    Ok(())
}
