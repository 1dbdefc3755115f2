use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form used for guess comparison: trimmed, lowercased, NFD
/// decomposed with combining marks dropped.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
