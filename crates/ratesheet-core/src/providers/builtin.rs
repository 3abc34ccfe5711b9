use crate::error::RateError;
use crate::providers::{parse_provider_str, schema::ProviderDef};

const CEMC_JSON: &str = include_str!("../../../../providers/cemc.json");

/// Available predefined providers.
pub const PRESETS: &[&str] = &["cemc"];

/// Provider used when none is specified.
pub const DEFAULT_PRESET: &str = "cemc";

/// Load a predefined provider by key.
pub fn load_preset(key: &str) -> Result<ProviderDef, RateError> {
    match key {
        "cemc" => parse_provider_str(CEMC_JSON),
        _ => Err(RateError::ProviderInvalid(format!(
            "unknown provider '{}'. Available: {}",
            key,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionKind;

    #[test]
    fn test_load_cemc_preset() {
        let p = load_preset("cemc").unwrap();
        assert_eq!(p.utility, "CEMC");
        assert_eq!(p.sections.len(), 4);
        assert!(p.pdf_url.ends_with(".pdf"));
    }

    #[test]
    fn test_cemc_placeholder_sections_have_no_fields() {
        let p = load_preset("cemc").unwrap();
        assert!(p.section(SectionKind::ResidentialSeasonal).unwrap().fields.is_empty());
        assert!(p.section(SectionKind::ResidentialTou).unwrap().fields.is_empty());
        assert_eq!(
            p.section(SectionKind::ResidentialSupplemental).unwrap().fields.len(),
            4
        );
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
