pub mod render;

use crate::model::{ParsedDocument, RateField, SectionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Field name -> value for one section of a comparison summary.
pub type SummarySection = BTreeMap<String, Option<Decimal>>;

/// The comparison-relevant projection of a parsed rate sheet.
///
/// Keys are short, stable names (`energy_rate`, `part_a`, ...) decoupled from
/// both the parser's field names and the normalized schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    #[serde(default)]
    pub residential_standard: SummarySection,
    #[serde(default)]
    pub residential_supplemental: SummarySection,
}

impl ComparisonSummary {
    /// Sections in diff order.
    pub fn sections(&self) -> [(SectionKind, &SummarySection); 2] {
        [
            (SectionKind::ResidentialStandard, &self.residential_standard),
            (
                SectionKind::ResidentialSupplemental,
                &self.residential_supplemental,
            ),
        ]
    }
}

/// A single value that differs between the baseline and the current sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub section: String,
    pub field: String,
    pub old: Option<Decimal>,
    pub new: Option<Decimal>,
}

/// Project a parsed document onto the comparison summary.
pub fn summarize(doc: &ParsedDocument) -> ComparisonSummary {
    let rs = &doc.residential_standard;
    let srs = &doc.residential_supplemental;

    let section = |entries: &[(RateField, Option<Decimal>)]| -> SummarySection {
        entries
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), *value))
            .collect()
    };

    ComparisonSummary {
        residential_standard: section(&[
            (RateField::CustomerCharge, rs.customer_charge_usd_per_month),
            (RateField::EnergyRate, rs.energy_rate_usd_per_kwh),
            (RateField::TvaFuelRate, rs.tva_fuel_rate_usd_per_kwh),
        ]),
        residential_supplemental: section(&[
            (
                RateField::CustomerChargePartA,
                srs.customer_charge_part_a_usd_per_month,
            ),
            (
                RateField::CustomerChargePartB,
                srs.customer_charge_part_b_usd_per_month,
            ),
            (RateField::EnergyRate, srs.energy_rate_usd_per_kwh),
            (RateField::TvaFuelRate, srs.tva_fuel_rate_usd_per_kwh),
        ]),
    }
}

/// Compare `current` against `baseline`.
///
/// Sections are visited standard first, then supplemental; within a section
/// the union of both sides' field names is visited alphabetically. A field
/// missing on one side counts as null.
pub fn diff(current: &ComparisonSummary, baseline: &ComparisonSummary) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for ((kind, curr), (_, base)) in current.sections().into_iter().zip(baseline.sections()) {
        let fields: BTreeSet<&String> = curr.keys().chain(base.keys()).collect();
        for field in fields {
            let old = base.get(field).copied().flatten();
            let new = curr.get(field).copied().flatten();
            if old != new {
                changes.push(FieldChange {
                    section: kind.as_str().to_string(),
                    field: field.clone(),
                    old,
                    new,
                });
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StandardRate, SupplementalRate};
    use rust_decimal_macros::dec;

    fn summary(
        standard: &[(&str, Option<Decimal>)],
        supplemental: &[(&str, Option<Decimal>)],
    ) -> ComparisonSummary {
        let to_map = |entries: &[(&str, Option<Decimal>)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<SummarySection>()
        };
        ComparisonSummary {
            residential_standard: to_map(standard),
            residential_supplemental: to_map(supplemental),
        }
    }

    fn baseline() -> ComparisonSummary {
        summary(
            &[
                ("customer_charge", Some(dec!(39.0))),
                ("energy_rate", Some(dec!(0.08058))),
                ("tva_fuel_rate", Some(dec!(0.02177))),
            ],
            &[
                ("part_a", Some(dec!(28.0))),
                ("part_b", Some(dec!(40.54))),
                ("energy_rate", Some(dec!(0.08061))),
                ("tva_fuel_rate", Some(dec!(0.02177))),
            ],
        )
    }

    #[test]
    fn test_summarize_structure() {
        let doc = ParsedDocument {
            residential_standard: StandardRate {
                is_present: true,
                customer_charge_usd_per_month: Some(dec!(39.0)),
                energy_rate_usd_per_kwh: Some(dec!(0.08058)),
                ..Default::default()
            },
            residential_supplemental: SupplementalRate {
                customer_charge_part_b_usd_per_month: Some(dec!(40.54)),
                ..Default::default()
            },
            ..Default::default()
        };
        let s = summarize(&doc);
        assert_eq!(s.residential_standard["customer_charge"], Some(dec!(39.0)));
        assert_eq!(s.residential_standard["energy_rate"], Some(dec!(0.08058)));
        assert_eq!(s.residential_standard["tva_fuel_rate"], None);
        assert_eq!(s.residential_standard.len(), 3);
        assert_eq!(s.residential_supplemental["part_b"], Some(dec!(40.54)));
        assert_eq!(
            s.residential_supplemental.keys().collect::<Vec<_>>(),
            vec!["energy_rate", "part_a", "part_b", "tva_fuel_rate"]
        );
    }

    #[test]
    fn test_identical_summaries_have_no_changes() {
        assert!(diff(&baseline(), &baseline()).is_empty());
        let empty = ParsedDocument::default();
        assert!(diff(&summarize(&empty), &summarize(&empty)).is_empty());
    }

    #[test]
    fn test_single_change_detected() {
        let mut current = baseline();
        current
            .residential_standard
            .insert("energy_rate".into(), Some(dec!(0.0821)));
        let changes = diff(&current, &baseline());
        assert_eq!(
            changes,
            vec![FieldChange {
                section: "residential_standard".into(),
                field: "energy_rate".into(),
                old: Some(dec!(0.08058)),
                new: Some(dec!(0.0821)),
            }]
        );
    }

    #[test]
    fn test_equal_values_with_different_scale() {
        let mut current = baseline();
        current
            .residential_standard
            .insert("customer_charge".into(), Some(dec!(39.00)));
        assert!(diff(&current, &baseline()).is_empty());
    }

    #[test]
    fn test_null_transitions_are_changes() {
        let mut current = baseline();
        current.residential_supplemental.insert("part_a".into(), None);
        let mut base = baseline();
        base.residential_standard.insert("tva_fuel_rate".into(), None);

        let changes = diff(&current, &base);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field, "tva_fuel_rate");
        assert_eq!(changes[0].old, None);
        assert_eq!(changes[0].new, Some(dec!(0.02177)));
        assert_eq!(changes[1].section, "residential_supplemental");
        assert_eq!(changes[1].old, Some(dec!(28.0)));
        assert_eq!(changes[1].new, None);
    }

    #[test]
    fn test_field_union_and_ordering() {
        let current = summary(
            &[("energy_rate", Some(dec!(0.09))), ("demand", Some(dec!(5)))],
            &[("part_a", Some(dec!(1)))],
        );
        let base = summary(
            &[("energy_rate", Some(dec!(0.08))), ("customer_charge", Some(dec!(39)))],
            &[("part_a", Some(dec!(1)))],
        );
        let changes = diff(&current, &base);
        let fields: Vec<(&str, &str)> = changes
            .iter()
            .map(|c| (c.section.as_str(), c.field.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("residential_standard", "customer_charge"),
                ("residential_standard", "demand"),
                ("residential_standard", "energy_rate"),
            ]
        );
        assert_eq!(changes[0].new, None);
        assert_eq!(changes[1].old, None);
    }

    #[test]
    fn test_missing_key_equals_null() {
        let current = summary(&[("energy_rate", None)], &[]);
        let base = summary(&[], &[]);
        assert!(diff(&current, &base).is_empty());
    }

    #[test]
    fn test_summary_deserializes_from_numbers() {
        let json = r#"{
            "residential_standard": { "customer_charge": 39.0, "energy_rate": 0.08058, "tva_fuel_rate": null },
            "residential_supplemental": { "part_a": 28 }
        }"#;
        let s: ComparisonSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.residential_standard["energy_rate"], Some(dec!(0.08058)));
        assert_eq!(s.residential_standard["tva_fuel_rate"], None);
        assert_eq!(s.residential_supplemental["part_a"], Some(dec!(28)));
    }
}
