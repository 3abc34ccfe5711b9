use crate::model::{ParsedDocument, SeasonalRate, TouRate};
use crate::providers::schema::ProviderDef;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const NORMALIZED_SCHEMA_VERSION: &str = "1.0";

/// Decimal places kept on derived cent values.
const CENTS_SCALE: u32 = 5;

/// Stable external JSON shape served to consumers. Evolves additively only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub schema_version: String,
    pub utility: String,
    pub source: String,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub rates: NormalizedRates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRates {
    pub residential_standard: NormalizedStandard,
    pub residential_supplemental: NormalizedSupplemental,
    pub residential_seasonal: SeasonalRate,
    pub residential_tou: TouRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStandard {
    pub is_present: bool,
    pub customer_charge_monthly_usd: Option<Decimal>,
    pub energy_rate_usd_per_kwh: Option<Decimal>,
    pub energy_rate_cents_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_usd_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_cents_per_kwh: Option<Decimal>,
    pub raw_section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSupplemental {
    pub is_present: bool,
    pub customer_charge_part_a_monthly_usd: Option<Decimal>,
    pub customer_charge_part_b_monthly_usd: Option<Decimal>,
    pub energy_rate_usd_per_kwh: Option<Decimal>,
    pub energy_rate_cents_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_usd_per_kwh: Option<Decimal>,
    pub tva_fuel_rate_cents_per_kwh: Option<Decimal>,
    pub raw_section: Option<String>,
}

/// Convert a dollar rate to cents, rounded to five decimal places.
///
/// Parsed values always have a cent value; a value that cannot be scaled
/// (only possible from hand-edited JSON) yields null rather than panicking.
pub fn to_cents(usd: Option<Decimal>) -> Option<Decimal> {
    usd?.checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp(CENTS_SCALE))
}

/// Normalize a parsed document, stamping the current time.
pub fn normalize(doc: &ParsedDocument, provider: &ProviderDef) -> NormalizedRecord {
    normalize_at(doc, provider, Utc::now())
}

/// Normalize a parsed document with an explicit fetch timestamp.
pub fn normalize_at(
    doc: &ParsedDocument,
    provider: &ProviderDef,
    fetched_at: DateTime<Utc>,
) -> NormalizedRecord {
    let rs = &doc.residential_standard;
    let srs = &doc.residential_supplemental;

    NormalizedRecord {
        schema_version: NORMALIZED_SCHEMA_VERSION.to_string(),
        utility: provider.utility.clone(),
        source: provider.source.clone(),
        source_url: provider.source_url.clone(),
        fetched_at,
        rates: NormalizedRates {
            residential_standard: NormalizedStandard {
                is_present: rs.is_present,
                customer_charge_monthly_usd: rs.customer_charge_usd_per_month,
                energy_rate_usd_per_kwh: rs.energy_rate_usd_per_kwh,
                energy_rate_cents_per_kwh: to_cents(rs.energy_rate_usd_per_kwh),
                tva_fuel_rate_usd_per_kwh: rs.tva_fuel_rate_usd_per_kwh,
                tva_fuel_rate_cents_per_kwh: to_cents(rs.tva_fuel_rate_usd_per_kwh),
                raw_section: rs.raw_section.clone(),
            },
            residential_supplemental: NormalizedSupplemental {
                is_present: srs.is_present,
                customer_charge_part_a_monthly_usd: srs.customer_charge_part_a_usd_per_month,
                customer_charge_part_b_monthly_usd: srs.customer_charge_part_b_usd_per_month,
                energy_rate_usd_per_kwh: srs.energy_rate_usd_per_kwh,
                energy_rate_cents_per_kwh: to_cents(srs.energy_rate_usd_per_kwh),
                tva_fuel_rate_usd_per_kwh: srs.tva_fuel_rate_usd_per_kwh,
                tva_fuel_rate_cents_per_kwh: to_cents(srs.tva_fuel_rate_usd_per_kwh),
                raw_section: srs.raw_section.clone(),
            },
            residential_seasonal: doc.residential_seasonal.clone(),
            residential_tou: doc.residential_tou.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StandardRate, SupplementalRate};
    use crate::providers::builtin::load_preset;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn parsed() -> ParsedDocument {
        ParsedDocument {
            raw_text: "sheet".into(),
            residential_standard: StandardRate {
                is_present: true,
                raw_section: Some("RESIDENTIAL RATE".into()),
                customer_charge_usd_per_month: Some(dec!(39.00)),
                energy_rate_usd_per_kwh: Some(dec!(0.08058)),
                tva_fuel_rate_usd_per_kwh: Some(dec!(0.02177)),
            },
            residential_supplemental: SupplementalRate {
                is_present: true,
                raw_section: Some("SUPPLEMENTAL".into()),
                customer_charge_part_a_usd_per_month: Some(dec!(28.00)),
                customer_charge_part_b_usd_per_month: Some(dec!(40.54)),
                energy_rate_usd_per_kwh: None,
                tva_fuel_rate_usd_per_kwh: Some(dec!(0.02177)),
            },
            ..Default::default()
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(Some(dec!(0.08058))), Some(dec!(8.058)));
        assert_eq!(to_cents(Some(dec!(0.0217712345))), Some(dec!(2.17712)));
        assert_eq!(to_cents(None), None);
    }

    #[test]
    fn test_garbled_rate_normalizes_without_panic() {
        let provider = load_preset("cemc").unwrap();
        let parser = crate::parsing::RateSheetParser::new(&provider).unwrap();
        let doc = parser.parse(
            "RESIDENTIAL RATE - SCHEDULE RS\n\
             Energy Charge: $1,000,000,000,000,000,000,000,000,000 per kWh\n\
             TVA Fuel Charge: $.02177 per kWh",
        );
        let rs = normalize_at(&doc, &provider, fixed_time()).rates.residential_standard;
        assert!(rs.is_present);
        assert_eq!(rs.energy_rate_usd_per_kwh, None);
        assert_eq!(rs.energy_rate_cents_per_kwh, None);
        assert_eq!(rs.tva_fuel_rate_cents_per_kwh, Some(dec!(2.177)));

        assert_eq!(to_cents(Some(Decimal::MAX)), None);
    }

    #[test]
    fn test_normalize_standard() {
        let provider = load_preset("cemc").unwrap();
        let n = normalize_at(&parsed(), &provider, fixed_time());
        assert_eq!(n.utility, "CEMC");
        assert_eq!(n.schema_version, NORMALIZED_SCHEMA_VERSION);
        assert_eq!(n.fetched_at, fixed_time());
        let rs = &n.rates.residential_standard;
        assert!(rs.is_present);
        assert_eq!(rs.customer_charge_monthly_usd, Some(dec!(39.00)));
        assert_eq!(rs.energy_rate_cents_per_kwh, Some(dec!(8.058)));
        assert_eq!(rs.tva_fuel_rate_cents_per_kwh, Some(dec!(2.177)));
        assert_eq!(rs.raw_section.as_deref(), Some("RESIDENTIAL RATE"));
    }

    #[test]
    fn test_cents_null_iff_usd_null() {
        let provider = load_preset("cemc").unwrap();
        let n = normalize_at(&parsed(), &provider, fixed_time());
        let srs = &n.rates.residential_supplemental;
        assert_eq!(srs.energy_rate_usd_per_kwh, None);
        assert_eq!(srs.energy_rate_cents_per_kwh, None);
        assert_eq!(srs.customer_charge_part_b_monthly_usd, Some(dec!(40.54)));
        assert_eq!(srs.tva_fuel_rate_cents_per_kwh, Some(dec!(2.177)));
    }

    #[test]
    fn test_placeholders_pass_through() {
        let provider = load_preset("cemc").unwrap();
        let n = normalize_at(&parsed(), &provider, fixed_time());
        assert_eq!(n.rates.residential_seasonal, SeasonalRate::default());
        assert!(!n.rates.residential_tou.is_present);
    }

    #[test]
    fn test_deterministic_for_same_clock() {
        let provider = load_preset("cemc").unwrap();
        let doc = parsed();
        assert_eq!(
            normalize_at(&doc, &provider, fixed_time()),
            normalize_at(&doc, &provider, fixed_time())
        );
    }

    #[test]
    fn test_json_shape() {
        let provider = load_preset("cemc").unwrap();
        let json = serde_json::to_value(normalize_at(&parsed(), &provider, fixed_time())).unwrap();
        let rs = &json["rates"]["residential_standard"];
        assert_eq!(rs["energy_rate_cents_per_kwh"], serde_json::json!(8.058));
        assert_eq!(rs["customer_charge_monthly_usd"], serde_json::json!(39.0));
        assert!(json["rates"]["residential_supplemental"]["energy_rate_cents_per_kwh"].is_null());
        assert!(json["rates"]["residential_tou"]["on_peak_hours"].is_null());
        assert_eq!(json["source_url"], "https://cemc.org/my-account/#residential-rates");
        assert_eq!(json["fetched_at"], "2025-11-03T12:00:00Z");
    }
}
