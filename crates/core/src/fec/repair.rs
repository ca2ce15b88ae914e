//! Repair of UTF-8 text that was read as Windows-1252.
//!
//! The table is a fixed heuristic, applied in order. It can alter legitimate
//! text that happens to contain one of the patterns (e.g. a literal `Ã©`).

/// Ordered `(mojibake, repaired)` substitutions.
///
/// Three-character sequences come first so their `â€` prefix is not split by
/// a shorter pattern.
pub const MOJIBAKE_REPAIRS: &[(&str, &str)] = &[
    ("â€™", "’"),
    ("â€œ", "“"),
    ("â€\u{9d}", "”"),
    ("â€¦", "…"),
    ("â€“", "–"),
    ("â€”", "—"),
    ("â€˜", "‘"),
    ("â‚¬", "€"),
    ("Ã\u{a0}", "à"),
    ("Ã¢", "â"),
    ("Ã¤", "ä"),
    ("Ã§", "ç"),
    ("Ã¨", "è"),
    ("Ã©", "é"),
    ("Ãª", "ê"),
    ("Ã«", "ë"),
    ("Ã®", "î"),
    ("Ã¯", "ï"),
    ("Ã´", "ô"),
    ("Ã¶", "ö"),
    ("Ã¹", "ù"),
    ("Ã»", "û"),
    ("Ã¼", "ü"),
    ("Ã¿", "ÿ"),
    ("Ã€", "À"),
    ("Ã‚", "Â"),
    ("Ã‡", "Ç"),
    ("Ãˆ", "È"),
    ("Ã‰", "É"),
    ("ÃŠ", "Ê"),
    ("Ã‹", "Ë"),
    ("ÃŽ", "Î"),
    ("Ã\u{8f}", "Ï"),
    ("Ã”", "Ô"),
    ("Ã™", "Ù"),
    ("Ã›", "Û"),
    ("Ãœ", "Ü"),
    ("Å“", "œ"),
    ("Å’", "Œ"),
    ("Â°", "°"),
    ("Â«", "«"),
    ("Â»", "»"),
    ("Â²", "²"),
    ("Â\u{a0}", "\u{a0}"),
];

/// Applies [`MOJIBAKE_REPAIRS`] to `text`.
#[must_use]
pub fn repair_mojibake(text: &str) -> String {
    // Every pattern starts with one of these.
    if !text.contains(['Ã', 'â', 'Å', 'Â']) {
        return text.to_string();
    }

    MOJIBAKE_REPAIRS
        .iter()
        .fold(text.to_string(), |repaired, (broken, fixed)| {
            if repaired.contains(broken) {
                repaired.replace(broken, fixed)
            } else {
                repaired
            }
        })
}
