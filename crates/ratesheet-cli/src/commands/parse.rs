use ratesheet_core::error::RateError;
use std::path::PathBuf;

use super::Context;
use crate::output;
use crate::{InputArgs, SourceArgs};

pub fn run(
    args: &SourceArgs,
    input: &InputArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), RateError> {
    let ctx = Context::from_args(args)?;
    let parsed = ctx.load_document(input)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!("Parsed rate sheet written to {}", path.display());
            let missing: Vec<&str> = [
                ("residential_standard", parsed.residential_standard.is_present),
                (
                    "residential_supplemental",
                    parsed.residential_supplemental.is_present,
                ),
            ]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect();
            for name in missing {
                eprintln!("  warning: section {name} not found");
            }
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => println!("{}", output::table::format_parsed(&parsed)),
        },
    }

    Ok(())
}
