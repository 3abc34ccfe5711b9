use crate::diff::FieldChange;
use rust_decimal::Decimal;

pub const NO_CHANGES_TEXT: &str = "No changes detected.";
pub const NO_CHANGES_MARKDOWN: &str = "_No changes detected._";

/// Group changes by section, keeping the order sections first appear in.
fn group_by_section(changes: &[FieldChange]) -> Vec<(&str, Vec<&FieldChange>)> {
    let mut groups: Vec<(&str, Vec<&FieldChange>)> = Vec::new();
    for change in changes {
        match groups.iter_mut().find(|(s, _)| *s == change.section) {
            Some((_, group)) => group.push(change),
            None => groups.push((change.section.as_str(), vec![change])),
        }
    }
    groups
}

fn format_value(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.normalize().to_string(),
        None => "null".to_string(),
    }
}

/// Render changes as a Markdown list suitable for an issue body.
pub fn render_markdown(changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES_MARKDOWN.to_string();
    }

    let mut lines = vec![
        "The following rate changes were detected:".to_string(),
        String::new(),
    ];
    for (section, group) in group_by_section(changes) {
        lines.push(format!("### {}", section));
        lines.push(String::new());
        for ch in group {
            lines.push(format!(
                "- **{}**: `{}` → `{}`",
                ch.field,
                format_value(ch.old),
                format_value(ch.new)
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render changes as plain text for terminal output.
pub fn render_text(changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES_TEXT.to_string();
    }

    let mut lines = vec!["Changes detected:".to_string()];
    for (section, group) in group_by_section(changes) {
        lines.push(String::new());
        lines.push(format!("[{}]", section));
        for ch in group {
            lines.push(format!(
                "  {}: {} -> {}",
                ch.field,
                format_value(ch.old),
                format_value(ch.new)
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn change(
        section: &str,
        field: &str,
        old: Option<Decimal>,
        new: Option<Decimal>,
    ) -> FieldChange {
        FieldChange {
            section: section.into(),
            field: field.into(),
            old,
            new,
        }
    }

    #[test]
    fn test_empty_renders_sentinel() {
        assert_eq!(render_text(&[]), NO_CHANGES_TEXT);
        assert_eq!(render_markdown(&[]), NO_CHANGES_MARKDOWN);
        assert_ne!(NO_CHANGES_TEXT, NO_CHANGES_MARKDOWN);
        assert!(!render_text(&[]).is_empty());
    }

    #[test]
    fn test_text_contains_values() {
        let txt = render_text(&[change(
            "residential_standard",
            "energy_rate",
            Some(dec!(0.0805)),
            Some(dec!(0.0821)),
        )]);
        assert!(txt.starts_with("Changes detected:"));
        assert!(txt.contains("[residential_standard]"));
        assert!(txt.contains("energy_rate: 0.0805 -> 0.0821"));
    }

    #[test]
    fn test_markdown_groups_same_section() {
        let md = render_markdown(&[
            change(
                "residential_standard",
                "energy_rate",
                Some(dec!(0.08058)),
                Some(dec!(0.0821)),
            ),
            change(
                "residential_standard",
                "customer_charge",
                Some(dec!(39.00)),
                Some(dec!(41.00)),
            ),
        ]);
        assert_eq!(md.matches("### residential_standard").count(), 1);
        let energy = md.find("**energy_rate**: `0.08058` → `0.0821`").unwrap();
        let customer = md.find("**customer_charge**: `39` → `41`").unwrap();
        assert!(energy < customer);
    }

    #[test]
    fn test_sections_keep_first_seen_order() {
        let changes = [
            change("residential_supplemental", "part_a", Some(dec!(28)), Some(dec!(29))),
            change("residential_standard", "energy_rate", None, Some(dec!(0.08))),
            change("residential_supplemental", "part_b", Some(dec!(40.54)), None),
        ];
        let md = render_markdown(&changes);
        let supplemental = md.find("### residential_supplemental").unwrap();
        let standard = md.find("### residential_standard").unwrap();
        assert!(supplemental < standard);
        assert_eq!(md.matches("### ").count(), 2);
        assert!(md.contains("- **part_b**: `40.54` → `null`"));

        let txt = render_text(&changes);
        assert!(txt.contains("energy_rate: null -> 0.08"));
        assert_eq!(txt.matches("[residential_supplemental]").count(), 1);
    }
}
