//! Item-text parser: tokenizer + normalizer

use crate::parsing::normalizer::Normalizer;
use crate::parsing::rules::BasicTokenProvider;
use crate::parsing::tokenizer::{TokenProvider, Tokenizer};
use crate::parsing::types::ParseOutcome;

/// Inventory item parser
pub struct InventoryParser<P: TokenProvider = BasicTokenProvider> {
    tokenizer: Tokenizer<P>,
    normalizer: Normalizer,
}

impl InventoryParser<BasicTokenProvider> {
    pub fn new() -> Self {
        Self::with_provider(BasicTokenProvider)
    }
}

impl<P: TokenProvider> InventoryParser<P> {
    /// Parser with a custom dictionary
    pub fn with_provider(provider: P) -> Self {
        Self {
            tokenizer: Tokenizer::new(provider),
            normalizer: Normalizer::new(),
        }
    }

    /// Parse one transcript into item text, quantity and unit
    pub fn parse(&self, raw_text: &str) -> ParseOutcome {
        if raw_text.trim().is_empty() {
            return ParseOutcome::failed("empty input");
        }

        let tokenization = self.tokenizer.tokenize(raw_text);
        self.normalizer
            .normalize(tokenization.tokens, &tokenization.unknown_words)
    }
}

impl Default for InventoryParser<BasicTokenProvider> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::types::{ParseStatus, Token, UnitType};

    #[test]
    fn test_parses_cable_dimensions() {
        let result = InventoryParser::new().parse("igrek de igrek trzy na dwa i pol");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("YDY 3x2,5"));
    }

    #[test]
    fn test_parses_code_with_separators() {
        let result = InventoryParser::new().parse("ce ha cztery myslnik sto piecdziesiat slash bax");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("CH4-150/BAX"));
    }

    #[test]
    fn test_extracts_quantity_and_unit() {
        let result = InventoryParser::new().parse("hager b szesnascie 12 sztuk");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("HAGER B16"));
        assert_eq!(result.extracted_quantity, Some(12));
        assert_eq!(result.extracted_unit, Some(UnitType::Szt));
    }

    #[test]
    fn test_handles_digits_with_quantity() {
        let result = InventoryParser::new().parse("hager b 16 5 sztuk");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("HAGER B16"));
        assert_eq!(result.extracted_quantity, Some(5));
        assert_eq!(result.extracted_unit, Some(UnitType::Szt));
    }

    #[test]
    fn test_normalizes_named_cables() {
        let parser = InventoryParser::new();
        assert_eq!(
            parser.parse("kabel trzy na dwa i pol").normalized_text.as_deref(),
            Some("KABEL 3x2,5")
        );
        assert_eq!(
            parser.parse("przewod dwa na dwa i pol").normalized_text.as_deref(),
            Some("PRZEWOD 2x2,5")
        );
    }

    #[test]
    fn test_keeps_quantity_when_present_in_text() {
        let result = InventoryParser::new().parse("igrek de igrek trzy na dwa i pol 15 sztuk");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("YDY 3x2,5"));
        assert_eq!(result.extracted_quantity, Some(15));
        assert_eq!(result.extracted_unit, Some(UnitType::Szt));
    }

    #[test]
    fn test_warns_on_unknown_words() {
        let result = InventoryParser::new().parse("nieznane slowo 5 sztuk");
        assert_eq!(result.status, ParseStatus::Warning);
        assert_eq!(result.normalized_text.as_deref(), Some("NIEZNANE SLOWO"));
        assert_eq!(result.extracted_quantity, Some(5));
    }

    #[test]
    fn test_fails_on_blank_input() {
        let result = InventoryParser::new().parse(" ");
        assert_eq!(result.status, ParseStatus::Fail);
        assert!(result.normalized_text.is_none());
    }

    #[test]
    fn test_code_without_suffix_and_breaker() {
        let parser = InventoryParser::new();
        assert_eq!(
            parser.parse("ce ha cztery myslnik sto piecdziesiat").normalized_text.as_deref(),
            Some("CH4-150")
        );
        assert_eq!(parser.parse("b szesnascie").normalized_text.as_deref(), Some("B16"));
    }

    #[test]
    fn test_retains_quantity_even_when_no_text() {
        let result = InventoryParser::new().parse("20 sztuk");
        assert_eq!(result.status, ParseStatus::Fail);
        assert_eq!(result.extracted_quantity, Some(20));
        assert_eq!(result.extracted_unit, Some(UnitType::Szt));
    }

    struct BrandOnly;

    impl TokenProvider for BrandOnly {
        fn token_for(&self, word: &str) -> Option<Token> {
            (word == "hager").then(|| Token::word("HAGER"))
        }
    }

    #[test]
    fn test_custom_provider_reports_unknown_vocabulary() {
        let result = InventoryParser::with_provider(BrandOnly).parse("hager sztuk");
        assert_eq!(result.status, ParseStatus::Warning);
        assert_eq!(result.normalized_text.as_deref(), Some("HAGER SZTUK"));
    }
}
