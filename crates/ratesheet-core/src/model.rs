use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical sections of a residential rate sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ResidentialStandard,
    ResidentialSupplemental,
    ResidentialSeasonal,
    ResidentialTou,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::ResidentialStandard,
        SectionKind::ResidentialSupplemental,
        SectionKind::ResidentialSeasonal,
        SectionKind::ResidentialTou,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::ResidentialStandard => "residential_standard",
            SectionKind::ResidentialSupplemental => "residential_supplemental",
            SectionKind::ResidentialSeasonal => "residential_seasonal",
            SectionKind::ResidentialTou => "residential_tou",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric field that can be extracted from a section.
///
/// The serialized names double as the keys of the comparison summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateField {
    CustomerCharge,
    #[serde(rename = "part_a")]
    CustomerChargePartA,
    #[serde(rename = "part_b")]
    CustomerChargePartB,
    EnergyRate,
    TvaFuelRate,
}

impl RateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateField::CustomerCharge => "customer_charge",
            RateField::CustomerChargePartA => "part_a",
            RateField::CustomerChargePartB => "part_b",
            RateField::EnergyRate => "energy_rate",
            RateField::TvaFuelRate => "tva_fuel_rate",
        }
    }

    /// Whether this field exists on the record for `section`.
    ///
    /// Seasonal and time-of-use sections have no extractable fields yet.
    pub fn applies_to(&self, section: SectionKind) -> bool {
        match self {
            RateField::CustomerCharge => section == SectionKind::ResidentialStandard,
            RateField::CustomerChargePartA | RateField::CustomerChargePartB => {
                section == SectionKind::ResidentialSupplemental
            }
            RateField::EnergyRate | RateField::TvaFuelRate => matches!(
                section,
                SectionKind::ResidentialStandard | SectionKind::ResidentialSupplemental
            ),
        }
    }
}

impl fmt::Display for RateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records whose numeric fields are filled from the extraction table.
pub trait ChargeFields {
    /// Record a value for `field`. Fields the record does not carry are ignored.
    fn set(&mut self, field: RateField, value: Decimal);
}

/// Residential standard schedule (e.g. "Schedule RS").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardRate {
    pub is_present: bool,
    pub raw_section: Option<String>,
    pub customer_charge_usd_per_month: Option<Decimal>,
    pub energy_rate_usd_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_usd_per_kwh: Option<Decimal>,
}

impl StandardRate {
    pub fn detected(raw_section: &str) -> Self {
        StandardRate {
            is_present: true,
            raw_section: Some(raw_section.to_string()),
            ..Default::default()
        }
    }
}

impl ChargeFields for StandardRate {
    fn set(&mut self, field: RateField, value: Decimal) {
        match field {
            RateField::CustomerCharge => self.customer_charge_usd_per_month = Some(value),
            RateField::EnergyRate => self.energy_rate_usd_per_kwh = Some(value),
            RateField::TvaFuelRate => self.tva_fuel_rate_usd_per_kwh = Some(value),
            RateField::CustomerChargePartA | RateField::CustomerChargePartB => {}
        }
    }
}

/// Supplemental residential schedule (e.g. "Schedule SRS"), with a two-part
/// customer charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementalRate {
    pub is_present: bool,
    pub raw_section: Option<String>,
    pub customer_charge_part_a_usd_per_month: Option<Decimal>,
    pub customer_charge_part_b_usd_per_month: Option<Decimal>,
    pub energy_rate_usd_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_usd_per_kwh: Option<Decimal>,
}

impl SupplementalRate {
    pub fn detected(raw_section: &str) -> Self {
        SupplementalRate {
            is_present: true,
            raw_section: Some(raw_section.to_string()),
            ..Default::default()
        }
    }
}

impl ChargeFields for SupplementalRate {
    fn set(&mut self, field: RateField, value: Decimal) {
        match field {
            RateField::CustomerChargePartA => {
                self.customer_charge_part_a_usd_per_month = Some(value)
            }
            RateField::CustomerChargePartB => {
                self.customer_charge_part_b_usd_per_month = Some(value)
            }
            RateField::EnergyRate => self.energy_rate_usd_per_kwh = Some(value),
            RateField::TvaFuelRate => self.tva_fuel_rate_usd_per_kwh = Some(value),
            RateField::CustomerCharge => {}
        }
    }
}

/// Seasonal residential schedule. Only presence is detected; the numeric
/// fields stay null until extraction rules exist for a real seasonal sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalRate {
    pub is_present: bool,
    pub raw_section: Option<String>,
    pub summer_rate_usd_per_kwh: Option<Decimal>,
    pub winter_rate_usd_per_kwh: Option<Decimal>,
    pub summer_months: Option<String>,
    pub winter_months: Option<String>,
}

impl SeasonalRate {
    pub fn detected(raw_section: &str) -> Self {
        SeasonalRate {
            is_present: true,
            raw_section: Some(raw_section.to_string()),
            ..Default::default()
        }
    }
}

/// Residential time-of-use schedule. Presence only, like [`SeasonalRate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouRate {
    pub is_present: bool,
    pub raw_section: Option<String>,
    pub on_peak_rate_usd_per_kwh: Option<Decimal>,
    pub off_peak_rate_usd_per_kwh: Option<Decimal>,
    pub shoulder_rate_usd_per_kwh: Option<Decimal>,
    pub on_peak_hours: Option<String>,
    pub off_peak_hours: Option<String>,
    pub shoulder_hours: Option<String>,
}

impl TouRate {
    pub fn detected(raw_section: &str) -> Self {
        TouRate {
            is_present: true,
            raw_section: Some(raw_section.to_string()),
            ..Default::default()
        }
    }
}

/// Result of parsing one rate sheet. Absent sections are `Default` records
/// (`is_present = false`, every field null).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub raw_text: String,
    pub residential_standard: StandardRate,
    pub residential_supplemental: SupplementalRate,
    pub residential_seasonal: SeasonalRate,
    pub residential_tou: TouRate,
}
