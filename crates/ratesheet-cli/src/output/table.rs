use ratesheet_core::model::ParsedDocument;
use std::fmt::Display;

fn cell<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn header(out: &mut Vec<String>, title: &str, present: bool) {
    let status = if present { "" } else { "  (not found)" };
    out.push(format!("=== {} ==={}", title, status));
}

pub fn format_parsed(doc: &ParsedDocument) -> String {
    let mut out = Vec::new();

    let rs = &doc.residential_standard;
    header(&mut out, "Residential standard", rs.is_present);
    if rs.is_present {
        out.push(format!(
            "  Customer charge   {:>10}  USD/month",
            cell(rs.customer_charge_usd_per_month)
        ));
        out.push(format!(
            "  Energy rate       {:>10}  USD/kWh",
            cell(rs.energy_rate_usd_per_kwh)
        ));
        out.push(format!(
            "  TVA fuel rate     {:>10}  USD/kWh",
            cell(rs.tva_fuel_rate_usd_per_kwh)
        ));
    }
    out.push(String::new());

    let srs = &doc.residential_supplemental;
    header(&mut out, "Residential supplemental", srs.is_present);
    if srs.is_present {
        out.push(format!(
            "  Customer charge A {:>10}  USD/month",
            cell(srs.customer_charge_part_a_usd_per_month)
        ));
        out.push(format!(
            "  Customer charge B {:>10}  USD/month",
            cell(srs.customer_charge_part_b_usd_per_month)
        ));
        out.push(format!(
            "  Energy rate       {:>10}  USD/kWh",
            cell(srs.energy_rate_usd_per_kwh)
        ));
        out.push(format!(
            "  TVA fuel rate     {:>10}  USD/kWh",
            cell(srs.tva_fuel_rate_usd_per_kwh)
        ));
    }
    out.push(String::new());

    // Presence only; values are never extracted for these schedules.
    header(
        &mut out,
        "Residential seasonal",
        doc.residential_seasonal.is_present,
    );
    header(&mut out, "Residential time-of-use", doc.residential_tou.is_present);

    out.join("\n")
}
