pub mod section;
pub mod values;

use crate::error::RateError;
use crate::model::{
    ChargeFields, ParsedDocument, RateField, SeasonalRate, SectionKind, StandardRate,
    SupplementalRate, TouRate,
};
use crate::providers::schema::{ProviderDef, ValueUnit};
use crate::providers::validate_provider;
use regex::{Regex, RegexBuilder};
use section::locate;
use values::{extract_numeric, field_pattern};

/// Compile a rate sheet pattern: case-insensitive, `.` crosses line breaks.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// Parses extracted rate sheet text using a provider's section table.
///
/// All patterns are compiled once up front; parsing itself cannot fail.
#[derive(Debug, Clone)]
pub struct RateSheetParser {
    sections: Vec<CompiledSection>,
}

#[derive(Debug, Clone)]
struct CompiledSection {
    kind: SectionKind,
    header: Regex,
    ends_at: Vec<Regex>,
    fields: Vec<CompiledField>,
}

#[derive(Debug, Clone)]
struct CompiledField {
    field: RateField,
    pattern: Regex,
    unit: ValueUnit,
}

impl RateSheetParser {
    pub fn new(provider: &ProviderDef) -> Result<Self, RateError> {
        validate_provider(provider)?;

        let invalid = |e: regex::Error| RateError::ProviderInvalid(e.to_string());
        let mut sections = Vec::with_capacity(provider.sections.len());
        for def in &provider.sections {
            let ends_at = def
                .ends_at
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<Vec<_>, _>>()
                .map_err(invalid)?;
            let fields = def
                .fields
                .iter()
                .map(|f| -> Result<CompiledField, regex::Error> {
                    Ok(CompiledField {
                        field: f.field,
                        pattern: field_pattern(&f.label)?,
                        unit: f.unit,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(invalid)?;
            sections.push(CompiledSection {
                kind: def.kind,
                header: compile_pattern(&def.header).map_err(invalid)?,
                ends_at,
                fields,
            });
        }

        Ok(RateSheetParser { sections })
    }

    /// Parse extracted text into one record per section kind.
    ///
    /// A missing section yields an absent record and a missing field stays
    /// null; neither is an error.
    pub fn parse(&self, text: &str) -> ParsedDocument {
        let mut doc = ParsedDocument {
            raw_text: text.to_string(),
            ..Default::default()
        };

        for section in &self.sections {
            let Some(raw) = locate(text, &section.header, &section.ends_at) else {
                tracing::debug!(section = %section.kind, "section header not found");
                continue;
            };
            tracing::debug!(section = %section.kind, bytes = raw.len(), "located section");

            match section.kind {
                SectionKind::ResidentialStandard => {
                    doc.residential_standard = section.fill(StandardRate::detected(raw), raw)
                }
                SectionKind::ResidentialSupplemental => {
                    doc.residential_supplemental =
                        section.fill(SupplementalRate::detected(raw), raw)
                }
                SectionKind::ResidentialSeasonal => {
                    doc.residential_seasonal = SeasonalRate::detected(raw)
                }
                SectionKind::ResidentialTou => doc.residential_tou = TouRate::detected(raw),
            }
        }

        doc
    }
}

impl CompiledSection {
    fn fill<R: ChargeFields>(&self, mut record: R, raw: &str) -> R {
        for f in &self.fields {
            match extract_numeric(raw, &f.pattern) {
                Some(value) => record.set(f.field, f.unit.to_dollars(value)),
                None => tracing::debug!(
                    section = %self.kind,
                    field = %f.field,
                    "field not found in section"
                ),
            }
        }
        record
    }
}
