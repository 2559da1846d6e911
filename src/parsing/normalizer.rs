//! Item text normalizer
//!
//! Turns a token stream into canonical item text plus an optional
//! quantity/unit pair:
//! 1. quantity/unit extraction (first adjacent Number -> Unit pair)
//! 2. decimal merge (Number, Connector, Fraction)
//! 3. compound number merge ("sto" "pięćdziesiąt" -> 150)
//! 4. connector/fraction removal
//! 5. text rendering with compact code spacing

use crate::parsing::types::{ParseOutcome, ParseStatus, Token, TokenKind, UnitType};

/// Dimension separator symbol ("3x2,5")
const DIMENSION_SYMBOL: &str = "x";

struct QuantityExtraction {
    quantity: Option<u32>,
    unit: Option<UnitType>,
    remaining: Vec<Token>,
}

/// Normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a token stream
    pub fn normalize(&self, tokens: Vec<Token>, unknown_words: &[String]) -> ParseOutcome {
        if tokens.is_empty() {
            return ParseOutcome::failed("no tokens to parse");
        }

        let mut debug = Vec::new();
        if !unknown_words.is_empty() {
            debug.push(format!("unknown words: {}", unknown_words.join(", ")));
        }

        let extraction = Self::extract_quantity(tokens);
        if let (Some(quantity), Some(unit)) = (extraction.quantity, extraction.unit) {
            debug.push(format!("quantity detected: {} {}", quantity, unit.label()));
        }

        let merged = Self::merge_number_tokens(Self::merge_decimals(extraction.remaining));
        let cleaned: Vec<Token> = merged
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Connector | TokenKind::Fraction))
            .collect();

        let text = Self::render_text(&cleaned);
        let normalized_text = if text.trim().is_empty() { None } else { Some(text) };

        let status = match normalized_text {
            None => ParseStatus::Fail,
            Some(_) if !unknown_words.is_empty() => ParseStatus::Warning,
            Some(_) => ParseStatus::Ok,
        };

        tracing::debug!(
            "normalized {:?} status={:?} quantity={:?} unit={:?}",
            normalized_text,
            status,
            extraction.quantity,
            extraction.unit
        );

        ParseOutcome {
            normalized_text,
            status,
            debug,
            extracted_quantity: extraction.quantity,
            extracted_unit: extraction.unit,
        }
    }

    /// Remove the leftmost adjacent (Number, Unit) pair
    fn extract_quantity(mut tokens: Vec<Token>) -> QuantityExtraction {
        let position = tokens.windows(2).position(|pair| {
            pair[0].kind == TokenKind::Number
                && pair[0].number_value.is_some()
                && pair[1].kind == TokenKind::Unit
        });

        let Some(index) = position else {
            return QuantityExtraction {
                quantity: None,
                unit: None,
                remaining: tokens,
            };
        };

        let unit_token = tokens.remove(index + 1);
        let number_token = tokens.remove(index);
        QuantityExtraction {
            quantity: number_token.number_value,
            unit: unit_token.unit,
            remaining: tokens,
        }
    }

    /// Number, Connector, Fraction -> "<number>,<decimal part>"
    fn merge_decimals(tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut index = 0;

        while index < tokens.len() {
            let current = &tokens[index];
            let is_decimal = current.kind == TokenKind::Number
                && index + 2 < tokens.len()
                && tokens[index + 1].kind == TokenKind::Connector
                && tokens[index + 2].kind == TokenKind::Fraction;

            if is_decimal {
                let fraction = &tokens[index + 2].value;
                let decimal_part = fraction
                    .split_once(',')
                    .map(|(_, tail)| tail)
                    .unwrap_or(fraction.as_str());
                let mut merged = Token::number(format!("{},{}", current.value, decimal_part), None);
                merged.from_dictionary = current.from_dictionary;
                result.push(merged);
                index += 3;
            } else {
                result.push(current.clone());
                index += 1;
            }
        }

        result
    }

    /// Sum adjacent whole numbers forming one spoken compound
    fn merge_number_tokens(tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut pending: Option<(u32, bool)> = None;

        fn flush(result: &mut Vec<Token>, pending: &mut Option<(u32, bool)>) {
            if let Some((value, from_dictionary)) = pending.take() {
                let mut token = Token::number(value.to_string(), Some(value));
                token.from_dictionary = from_dictionary;
                result.push(token);
            }
        }

        for token in tokens {
            match (token.kind, token.number_value) {
                (TokenKind::Number, Some(value)) => match pending {
                    Some((left, left_dict)) if Self::should_combine(left, value) => {
                        pending = Some((left + value, left_dict && token.from_dictionary));
                    }
                    _ => {
                        flush(&mut result, &mut pending);
                        pending = Some((value, token.from_dictionary));
                    }
                },
                _ => {
                    flush(&mut result, &mut pending);
                    result.push(token);
                }
            }
        }

        flush(&mut result, &mut pending);
        result
    }

    fn should_combine(left: u32, right: u32) -> bool {
        let round_tens = left % 10 == 0 && (10..=90).contains(&left);
        (left >= 100 && right < 100) || (round_tens && (1..=9).contains(&right))
    }

    /// Join token values, compacting letter/number runs and symbols
    fn render_text(tokens: &[Token]) -> String {
        let mut text = String::new();

        for (index, current) in tokens.iter().enumerate() {
            let prev = index.checked_sub(1).map(|i| &tokens[i]);
            let next = tokens.get(index + 1);

            let dimension_number = current.kind == TokenKind::Number
                && next.is_some_and(|n| n.kind == TokenKind::Symbol && n.value == DIMENSION_SYMBOL);

            let skip_space = match prev {
                None => true,
                Some(_) if current.kind == TokenKind::Symbol => true,
                Some(p) if p.kind == TokenKind::Symbol => true,
                Some(p) => current.is_alphanumeric() && p.is_alphanumeric() && !dimension_number,
            };

            if !skip_space {
                text.push(' ');
            }
            text.push_str(&current.value);
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rules::BasicTokenProvider;
    use crate::parsing::tokenizer::Tokenizer;

    fn normalize(text: &str) -> ParseOutcome {
        let tokenization = Tokenizer::new(BasicTokenProvider).tokenize(text);
        Normalizer::new().normalize(tokenization.tokens, &tokenization.unknown_words)
    }

    #[test]
    fn test_cable_dimensions() {
        let result = normalize("igrek de igrek trzy na dwa i pół");
        assert_eq!(result.status, ParseStatus::Ok);
        assert_eq!(result.normalized_text.as_deref(), Some("YDY 3x2,5"));
        assert_eq!(result.extracted_quantity, None);
    }

    #[test]
    fn test_compound_number_merge() {
        let result = normalize("ce ha cztery myślnik sto pięćdziesiąt slash bax");
        assert_eq!(result.normalized_text.as_deref(), Some("CH4-150/BAX"));
        assert_eq!(result.status, ParseStatus::Ok);
    }

    #[test]
    fn test_independent_numbers_stay_apart() {
        // 16 and 5 are separate figures, rendered without a gap
        let tokens = vec![
            Token::number("16", Some(16)),
            Token::symbol("x"),
            Token::number("16", Some(16)),
            Token::number("5", Some(5)),
        ];
        let result = Normalizer::new().normalize(tokens, &[]);
        assert_eq!(result.normalized_text.as_deref(), Some("16x165"));
    }

    #[test]
    fn test_tens_and_ones_merge() {
        let tokens = vec![
            Token::letter("B"),
            Token::number("20", Some(20)),
            Token::number("5", Some(5)),
        ];
        let result = Normalizer::new().normalize(tokens, &[]);
        assert_eq!(result.normalized_text.as_deref(), Some("B25"));
    }

    #[test]
    fn test_leftmost_quantity_pair_wins() {
        let result = normalize("kabel 3 metry 5 sztuk");
        assert_eq!(result.extracted_quantity, Some(3));
        assert_eq!(result.extracted_unit, Some(UnitType::M));
        assert_eq!(result.normalized_text.as_deref(), Some("KABEL 5 szt"));
    }

    #[test]
    fn test_extraction_removes_exactly_two_tokens() {
        let tokens = vec![
            Token::word("KABEL"),
            Token::number("7", Some(7)),
            Token::unit(UnitType::Rolka),
            Token::word("BIALY"),
        ];
        let extraction = Normalizer::extract_quantity(tokens);
        assert_eq!(extraction.remaining.len(), 2);
        assert_eq!(extraction.quantity, Some(7));
        assert_eq!(extraction.unit, Some(UnitType::Rolka));
    }

    #[test]
    fn test_connectors_never_rendered() {
        let tokens = vec![
            Token::word("KABEL"),
            Token::connector("i"),
            Token::fraction("0,5"),
        ];
        let result = Normalizer::new().normalize(tokens, &[]);
        assert_eq!(result.normalized_text.as_deref(), Some("KABEL"));
    }

    #[test]
    fn test_quantity_without_name_fails() {
        let result = normalize("20 sztuk");
        assert_eq!(result.status, ParseStatus::Fail);
        assert_eq!(result.normalized_text, None);
        assert_eq!(result.extracted_quantity, Some(20));
        assert_eq!(result.extracted_unit, Some(UnitType::Szt));
    }

    #[test]
    fn test_unknown_words_warn() {
        let result = normalize("nieznane słowo 5 sztuk");
        assert_eq!(result.status, ParseStatus::Warning);
        assert_eq!(result.normalized_text.as_deref(), Some("NIEZNANE SŁOWO"));
        assert!(result.debug[0].contains("nieznane"));
    }
}
