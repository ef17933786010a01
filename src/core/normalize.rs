use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes arbitrary text for accent- and punctuation-insensitive matching.
///
/// Steps, in order: lowercase, expand the "fam." abbreviation to "familia",
/// strip accents (NFD, drop combining marks), replace non-alphanumeric
/// characters with spaces, collapse whitespace. Idempotent and total.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let expanded = expand_abbreviations(&lowered);
    let unaccented: String = expanded.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let cleaned: String = unaccented
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Expansion runs before punctuation stripping, otherwise "fam." would
// degrade to the bare token "fam" and never match "familia".
fn expand_abbreviations(text: &str) -> String {
    text.split_whitespace()
        .map(|token| if token == "fam." { "familia" } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}
