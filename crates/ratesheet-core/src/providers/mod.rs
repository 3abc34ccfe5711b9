pub mod builtin;
pub mod schema;

use crate::error::RateError;
use crate::parsing::compile_pattern;
use schema::ProviderDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a provider definition from a JSON file.
pub fn load_provider(path: &Path) -> Result<ProviderDef, RateError> {
    let content = std::fs::read_to_string(path).map_err(|e| RateError::ProviderLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_provider(&content, path)
}

/// Parse a provider definition from a JSON string.
pub fn parse_provider(json: &str, source: &Path) -> Result<ProviderDef, RateError> {
    let provider: ProviderDef = serde_json::from_str(json).map_err(|e| RateError::ProviderLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_provider(&provider)?;
    Ok(provider)
}

/// Parse a provider definition from a JSON string (no file path context).
pub fn parse_provider_str(json: &str) -> Result<ProviderDef, RateError> {
    let provider: ProviderDef = serde_json::from_str(json).map_err(RateError::Json)?;
    validate_provider(&provider)?;
    Ok(provider)
}

/// Validate that a provider definition is well-formed.
pub fn validate_provider(provider: &ProviderDef) -> Result<(), RateError> {
    if provider.key.trim().is_empty() {
        return Err(RateError::ProviderInvalid("key must not be empty".into()));
    }

    if provider.sections.is_empty() {
        return Err(RateError::ProviderInvalid(
            "sections must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for section in &provider.sections {
        if !seen.insert(section.kind) {
            return Err(RateError::ProviderInvalid(format!(
                "section '{}' is defined more than once",
                section.kind
            )));
        }

        check_pattern(&section.header, section.kind.as_str())?;
        for next in &section.ends_at {
            check_pattern(next, section.kind.as_str())?;
        }

        let mut fields = HashSet::new();
        for field in &section.fields {
            if !field.field.applies_to(section.kind) {
                return Err(RateError::ProviderInvalid(format!(
                    "field '{}' is not extractable from section '{}'",
                    field.field, section.kind
                )));
            }
            if !fields.insert(field.field) {
                return Err(RateError::ProviderInvalid(format!(
                    "field '{}' is defined more than once in section '{}'",
                    field.field, section.kind
                )));
            }
            check_pattern(&field.label, section.kind.as_str())?;
        }
    }

    Ok(())
}

fn check_pattern(pattern: &str, section: &str) -> Result<(), RateError> {
    if pattern.trim().is_empty() {
        return Err(RateError::ProviderInvalid(format!(
            "section '{}' has an empty pattern",
            section
        )));
    }
    compile_pattern(pattern).map(|_| ()).map_err(|e| {
        RateError::ProviderInvalid(format!(
            "section '{}' has invalid pattern '{}': {}",
            section, pattern, e
        ))
    })
}
