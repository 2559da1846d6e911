//! Near-miss spellings in code mode
//!
//! Prefix table for symbols and letters the speech engine tends to garble
//! ("faul" -> V, "flesz" -> /), plus a built-in detector for broken
//! spellings of the letter name "igrek".

use crate::config::FuzzyPrefix;
use crate::parsing::spoken_number::normalize_polish;

/// Prefixes of mis-transcribed "igrek"
const Y_PREFIXES: &[&str] = &["igr", "grek", "grec"];

/// Ordered prefix -> symbol matcher
pub struct FuzzySymbolMatcher {
    /// (folded prefix, output symbol), first match wins
    prefixes: Vec<(String, String)>,
}

impl FuzzySymbolMatcher {
    pub fn new(entries: &[FuzzyPrefix]) -> Self {
        let prefixes = entries
            .iter()
            .map(|entry| (normalize_polish(&entry.prefix.to_lowercase()), entry.symbol.clone()))
            .filter(|(prefix, symbol)| !prefix.is_empty() && !symbol.is_empty())
            .collect();
        Self { prefixes }
    }

    /// Symbol for a token starting with a configured prefix
    pub fn try_match(&self, token: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(prefix, _)| token.starts_with(prefix.as_str()))
            .map(|(_, symbol)| symbol.as_str())
    }
}

/// Token is a broken spelling of "igrek" (Y)
pub fn is_y_mistranscription(token: &str) -> bool {
    token == "gry" || Y_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}
