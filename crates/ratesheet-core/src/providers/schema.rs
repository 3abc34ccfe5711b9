use crate::model::{RateField, SectionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A utility provider: where its rate sheet lives and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDef {
    /// Short slug, e.g. "cemc".
    pub key: String,
    /// Full provider name.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Utility label stamped on normalized records.
    pub utility: String,
    /// Human-readable source label stamped on normalized records.
    pub source: String,
    /// Public landing page for the rates.
    pub source_url: String,
    /// Direct URL of the rate sheet PDF.
    pub pdf_url: String,
    /// Section extraction table.
    pub sections: Vec<SectionDef>,
}

impl ProviderDef {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionDef> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// How to find one section and which fields to pull out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDef {
    pub kind: SectionKind,
    /// Regex matching the section header.
    pub header: String,
    /// Regexes for headers that may follow; the nearest one ends the section.
    #[serde(default)]
    pub ends_at: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A label regex for a numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub field: RateField,
    /// Regex matching the label that precedes the value, e.g. `Energy\s+Charge`.
    pub label: String,
    #[serde(default)]
    pub unit: ValueUnit,
}

/// The unit the sheet prints a value in. Values are always stored in dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    #[default]
    Dollars,
    Cents,
}

impl ValueUnit {
    pub fn to_dollars(&self, value: Decimal) -> Decimal {
        match self {
            ValueUnit::Dollars => value,
            ValueUnit::Cents => value / Decimal::ONE_HUNDRED,
        }
    }
}
