use ratesheet_core::error::RateError;

use super::Context;
use crate::SourceArgs;

pub fn run(args: &SourceArgs, force: bool) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let doc = ctx.cache.fetch(force)?;

    if doc.from_cache {
        eprintln!("Using cached copy (pass --force to re-download)");
    } else if let Some(meta) = ctx.cache.read_metadata()? {
        eprintln!(
            "Downloaded {} at {}",
            meta.source_url,
            meta.fetched_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    println!("{}", doc.path.display());

    Ok(())
}
