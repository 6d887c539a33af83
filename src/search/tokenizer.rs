use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9]+\b").expect("token pattern is valid"));

/// Splits raw document text into normalized tokens.
///
/// The text is lowercased, decomposed (NFD) and stripped of nonspacing marks,
/// so `"Canción"` becomes `"cancion"`. Tokens are maximal ASCII alphanumeric
/// runs bounded by Unicode word boundaries. Duplicates are kept in order.
pub fn normalize(text: &str) -> Vec<String> {
    let folded = strip_accents(&text.to_lowercase());
    TOKEN_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Folds a query term the way lookups expect it: lowercase only.
///
/// Accents are NOT stripped here, so `"Canción"` never matches the indexed
/// `"cancion"`. Callers that want accent-insensitive lookups must strip
/// accents themselves.
pub fn fold_query_term(term: &str) -> String {
    term.to_lowercase()
}

fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| c.general_category() != GeneralCategory::NonspacingMark)
        .collect()
}
