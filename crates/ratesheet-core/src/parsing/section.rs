use regex::Regex;

/// Return the block of `text` that starts at the first `header` match and
/// runs up to the nearest match of any `next_headers` pattern, or to the end
/// of the text when none follows.
///
/// Next headers are searched strictly after the header's first character, so a
/// bound that also matches the header itself does not produce an empty block.
pub fn locate<'t>(text: &'t str, header: &Regex, next_headers: &[Regex]) -> Option<&'t str> {
    let start = header.find(text)?.start();

    let search_from = start + text[start..].chars().next().map_or(0, char::len_utf8);
    let end = next_headers
        .iter()
        .filter_map(|re| re.find_at(text, search_from))
        .map(|m| m.start())
        .min()
        .unwrap_or(text.len());

    Some(&text[start..end])
}
