pub mod check;
pub mod diff;
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod providers;
pub mod snapshot;

use ratesheet_core::error::RateError;
use ratesheet_core::extraction::pdftotext::PdftotextExtractor;
use ratesheet_core::fetch::{DocumentCache, FetchConfig};
use ratesheet_core::model::ParsedDocument;
use ratesheet_core::parsing::RateSheetParser;
use ratesheet_core::providers::builtin;
use ratesheet_core::providers::schema::ProviderDef;
use ratesheet_core::snapshot::DEFAULT_SNAPSHOT_PATH;
use std::path::{Path, PathBuf};

use crate::{InputArgs, SourceArgs};

/// Resolved configuration for one invocation.
pub struct Context {
    pub provider: ProviderDef,
    pub cache: DocumentCache,
    pub snapshot_path: PathBuf,
}

impl Context {
    pub fn from_args(args: &SourceArgs) -> Result<Self, RateError> {
        let provider = match &args.provider_file {
            Some(path) => ratesheet_core::providers::load_provider(path)?,
            None => builtin::load_preset(&args.provider)?,
        };

        let url = args.url.clone().unwrap_or_else(|| provider.pdf_url.clone());
        if url.trim().is_empty() {
            return Err(RateError::Config(format!(
                "provider '{}' has no pdf_url; pass --url",
                provider.key
            )));
        }
        let mut config = FetchConfig::new(url);
        if let Some(dir) = &args.cache_dir {
            config.cache_dir = dir.clone();
        }

        Ok(Context {
            provider,
            cache: DocumentCache::new(config),
            snapshot_path: args
                .snapshot
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
        })
    }

    /// Parse the selected input: a pre-parsed JSON file, a local PDF, or the
    /// cached download (fetched first if needed).
    pub fn load_document(&self, input: &InputArgs) -> Result<ParsedDocument, RateError> {
        match &input.input {
            Some(path) if is_json(path) => {
                let json_bytes = std::fs::read(path)?;
                Ok(serde_json::from_slice(&json_bytes)?)
            }
            Some(path) => self.parse_file(path, input.layout),
            None => {
                let doc = self.cache.fetch(input.force)?;
                self.parse_file(&doc.path, input.layout)
            }
        }
    }

    fn parse_file(&self, path: &Path, layout: bool) -> Result<ParsedDocument, RateError> {
        let pdf_bytes = std::fs::read(path)?;
        let extractor = PdftotextExtractor::new().with_layout(layout);
        let parser = RateSheetParser::new(&self.provider)?;
        ratesheet_core::parse_pdf(&pdf_bytes, &extractor, &parser)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
