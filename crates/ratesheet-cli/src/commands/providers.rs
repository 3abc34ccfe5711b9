use ratesheet_core::error::RateError;
use ratesheet_core::model::SectionKind;
use ratesheet_core::providers::builtin;
use ratesheet_core::providers::schema::{ProviderDef, ValueUnit};
use std::path::Path;

pub fn list() -> Result<(), RateError> {
    println!("Available predefined providers:\n");
    for key in builtin::PRESETS {
        let p = builtin::load_preset(key)?;
        let marker = if *key == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<8} {}{}", key, p.name, marker);
        if let Some(ref desc) = p.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(key: &str) -> Result<(), RateError> {
    let p = builtin::load_preset(key)?;
    print_provider(&p);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RateError> {
    let p = ratesheet_core::providers::load_provider(file)?;

    println!("Provider '{}' ({}) is valid.", p.key, p.name);
    println!("  Sections: {}", p.sections.len());
    println!(
        "  Fields: {}",
        p.sections.iter().map(|s| s.fields.len()).sum::<usize>()
    );

    // Warnings, not errors
    let mut warnings = Vec::new();
    for kind in SectionKind::ALL {
        if p.section(kind).is_none() {
            warnings.push(format!("no section defined for '{}'", kind));
        }
    }
    for section in &p.sections {
        if section.ends_at.is_empty() {
            warnings.push(format!(
                "section '{}' has no ends_at patterns and runs to the end of the document",
                section.kind
            ));
        }
    }
    if p.pdf_url.trim().is_empty() {
        warnings.push("pdf_url is empty; --url will be required".into());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn print_provider(p: &ProviderDef) {
    println!("{} ({})\n", p.name, p.key);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }
    println!("  Utility:    {}", p.utility);
    println!("  Source:     {} <{}>", p.source, p.source_url);
    println!("  Rate sheet: {}\n", p.pdf_url);

    for section in &p.sections {
        println!("  [{}]", section.kind);
        println!("    starts at: {}", section.header);
        for end in &section.ends_at {
            println!("    ends at:   {}", end);
        }
        if section.fields.is_empty() {
            println!("    (presence only, no values extracted)");
        }

        let width = section
            .fields
            .iter()
            .map(|f| f.field.as_str().len())
            .max()
            .unwrap_or(0);
        for f in &section.fields {
            let unit = match f.unit {
                ValueUnit::Dollars => "USD",
                ValueUnit::Cents => "cents, stored as USD",
            };
            println!(
                "    {:<width$}  {}  ({})",
                f.field.as_str(),
                f.label,
                unit,
                width = width
            );
        }
        println!();
    }
}
