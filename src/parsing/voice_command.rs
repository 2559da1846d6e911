//! Voice command parser
//!
//! Recognizes marker commands ("dodaj marker regał A") and quantity commands
//! ("kabel ilość pięć metrów"); anything else becomes a plain item.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::config::VoiceCommandConfig;
use crate::parsing::rules::{MARKER_ALIASES, QUANTITY_TRIGGERS, UNIT_ALIASES};
use crate::parsing::spoken_number::{literal_value, normalize_polish, parse_number, ParsedNumber};
use crate::parsing::types::{ParseStatus, UnitType, VoiceCommandResult};

/// Punctuation trimmed from command words
const COMMAND_TRIM: &[char] = &[',', '.', ':'];

/// Punctuation trimmed from quantity words
const QUANTITY_TRIM: &[char] = &[',', '.', ';', ':'];

/// Separators stripped in front of a marker name
const MARKER_TEXT_TRIM: &[char] = &[' ', ':', ',', '.'];

lazy_static::lazy_static! {
    static ref QUANTITY_TRIGGER_MATCHER: Option<AhoCorasick> = match AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(QUANTITY_TRIGGERS)
    {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            tracing::error!("quantity trigger matcher unavailable: {}", err);
            None
        }
    };
}

/// Byte range of the first whole-word quantity trigger
pub fn find_quantity_trigger(text: &str) -> Option<(usize, usize)> {
    let matcher = QUANTITY_TRIGGER_MATCHER.as_ref()?;
    matcher
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .find(|&(start, end)| {
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
}

/// Non-whitespace words with their byte offsets
pub(crate) fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..idx]));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }

    words
}

/// Quantity and unit decoded from the text after a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityParse {
    pub quantity: Option<u32>,
    pub unit: Option<UnitType>,
    pub status: ParseStatus,
    pub debug: Vec<String>,
}

/// Voice command parser
pub struct VoiceCommandParser {
    max_marker_tokens: usize,
}

impl VoiceCommandParser {
    pub fn new(config: &VoiceCommandConfig) -> Self {
        Self {
            max_marker_tokens: config.max_marker_tokens.max(1),
        }
    }

    /// Parse a transcript: marker, else quantity command, else plain item
    pub fn parse(&self, raw_text: &str) -> VoiceCommandResult {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            tracing::info!("VoiceCommand: empty input");
            return VoiceCommandResult::empty_input();
        }

        if let Some(marker) = self.parse_marker_command(trimmed) {
            return marker;
        }

        if let Some(item) = self.parse_quantity_command(trimmed) {
            return item;
        }

        let line = "VoiceCommand: no quantity trigger".to_string();
        tracing::info!("{}", line);
        VoiceCommandResult::plain_item(trimmed, ParseStatus::Ok, vec![line])
    }

    /// Marker command, `None` when no trigger phrase leads the text
    pub fn parse_marker_command(&self, raw_text: &str) -> Option<VoiceCommandResult> {
        let text = raw_text.trim();
        let candidates: Vec<(usize, &str, String)> = words_with_offsets(text)
            .into_iter()
            .filter_map(|(offset, raw)| {
                let cleaned = normalize_polish(&raw.trim_matches(COMMAND_TRIM).to_lowercase());
                (!cleaned.is_empty()).then_some((offset, raw, cleaned))
            })
            .take(self.max_marker_tokens)
            .collect();

        let alias = MARKER_ALIASES.iter().find(|alias| {
            alias.words.len() <= candidates.len()
                && alias
                    .words
                    .iter()
                    .zip(&candidates)
                    .all(|(expected, (_, _, word))| word == expected)
        })?;

        let (offset, raw, _) = &candidates[alias.words.len() - 1];
        let marker_text = text[offset + raw.len()..]
            .trim_start_matches(MARKER_TEXT_TRIM)
            .trim();

        if marker_text.is_empty() {
            let line = "VoiceCommand: ADD_MARKER ignored (empty marker text)".to_string();
            tracing::info!("{}", line);
            return Some(VoiceCommandResult::Ignored {
                reason: "no marker text".to_string(),
                debug: vec![line],
            });
        }

        let line = format!(
            "VoiceCommand: ADD_MARKER (alias='{}') -> \"{}\"",
            alias.phrase, marker_text
        );
        tracing::info!("{}", line);
        Some(VoiceCommandResult::AddMarker {
            name: marker_text.to_string(),
            alias: alias.phrase.to_string(),
            debug: vec![line],
        })
    }

    /// Quantity command, `None` when the text has no quantity trigger
    pub fn parse_quantity_command(&self, raw_text: &str) -> Option<VoiceCommandResult> {
        let text = raw_text.trim();
        let (start, end) = find_quantity_trigger(text)?;
        let name = text[..start].trim();
        let tail = text[end..].trim();

        let parsed = self.parse_quantity_and_unit(tail);
        if let Some(line) = parsed.debug.first() {
            tracing::info!("{}", line);
        }

        let result = match parsed.quantity {
            None => VoiceCommandResult::Item {
                name: text.to_string(),
                quantity: None,
                unit: None,
                status: parsed.status,
                debug: parsed.debug,
            },
            Some(quantity) => VoiceCommandResult::Item {
                name: name.to_string(),
                quantity: Some(quantity),
                unit: parsed.unit,
                status: parsed.status,
                debug: parsed.debug,
            },
        };
        Some(result)
    }

    /// Decode "<number> [unit]" from the text following a quantity trigger
    pub fn parse_quantity_and_unit(&self, tail: &str) -> QuantityParse {
        let words: Vec<String> = tail
            .split_whitespace()
            .map(|w| normalize_polish(&w.trim_matches(QUANTITY_TRIM).to_lowercase()))
            .filter(|w| !w.is_empty())
            .collect();

        let Some(number) = Self::find_number(&words) else {
            return QuantityParse {
                quantity: None,
                unit: None,
                status: ParseStatus::Warning,
                debug: vec!["VoiceCommand: quantity trigger without numeric value".to_string()],
            };
        };

        let consumed = number.start_index..number.start_index + number.consumed;
        let remaining: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(index, _)| !consumed.contains(index))
            .map(|(_, word)| word.as_str())
            .collect();
        let unit = Self::find_unit(&remaining);

        let mut debug = vec![format!(
            "VoiceCommand: parsed quantity={} unit={}",
            number.value,
            unit.map(|u| u.label()).unwrap_or("none")
        )];
        if unit.is_none() {
            debug.push("VoiceCommand: no unit alias found".to_string());
        }

        QuantityParse {
            quantity: Some(number.value),
            unit,
            status: ParseStatus::Ok,
            debug,
        }
    }

    /// Literal digits anywhere win over spoken numbers
    fn find_number(words: &[String]) -> Option<ParsedNumber> {
        let literal = words.iter().enumerate().find_map(|(index, word)| {
            literal_value(word).map(|value| ParsedNumber {
                value,
                consumed: 1,
                start_index: index,
            })
        });

        literal.or_else(|| (0..words.len()).find_map(|index| parse_number(words, index)))
    }

    /// First unit alias in reading order; longer aliases win at one position
    fn find_unit(words: &[&str]) -> Option<UnitType> {
        (0..words.len()).find_map(|index| {
            UNIT_ALIASES
                .iter()
                .find(|alias| {
                    words
                        .get(index..index + alias.words.len())
                        .is_some_and(|window| window == alias.words.as_slice())
                })
                .map(|alias| alias.unit)
        })
    }
}

impl Default for VoiceCommandParser {
    fn default() -> Self {
        Self::new(&VoiceCommandConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> VoiceCommandParser {
        VoiceCommandParser::default()
    }

    #[test]
    fn test_blank_input_fails() {
        match parser().parse("   ") {
            VoiceCommandResult::Item { status, name, .. } => {
                assert_eq!(status, ParseStatus::Fail);
                assert!(name.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_marker_command() {
        match parser().parse("Dodaj marker: regał A") {
            VoiceCommandResult::AddMarker { name, alias, .. } => {
                assert_eq!(name, "regał A");
                assert_eq!(alias, "dodaj marker");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_marker_phonetic_alias() {
        match parser().parse("duda i markier strefa B") {
            VoiceCommandResult::AddMarker { name, alias, .. } => {
                assert_eq!(name, "strefa B");
                assert_eq!(alias, "duda i markier");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_marker_with_diacritics() {
        let result = parser().parse_marker_command("dodać marker półka 3");
        assert!(matches!(
            result,
            Some(VoiceCommandResult::AddMarker { ref name, .. }) if name == "półka 3"
        ));
    }

    #[test]
    fn test_empty_marker_is_ignored() {
        match parser().parse("dodaj marker .") {
            VoiceCommandResult::Ignored { reason, .. } => assert_eq!(reason, "no marker text"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_marker_must_lead_the_text() {
        assert!(parser().parse_marker_command("regał dodaj marker").is_none());
    }

    #[test]
    fn test_marker_window_limit() {
        let config = VoiceCommandConfig {
            max_marker_tokens: 2,
        };
        let parser = VoiceCommandParser::new(&config);
        assert!(parser.parse_marker_command("duda i marker A").is_none());
        assert!(parser.parse_marker_command("dodaj marker A").is_some());
    }

    #[test]
    fn test_quantity_command_spoken() {
        match parser().parse("kabel ilość pięćdziesiąt cztery metry") {
            VoiceCommandResult::Item {
                name,
                quantity,
                unit,
                status,
                ..
            } => {
                assert_eq!(name, "kabel");
                assert_eq!(quantity, Some(54));
                assert_eq!(unit, Some(UnitType::M));
                assert_eq!(status, ParseStatus::Ok);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_quantity_literal_beats_spoken() {
        let parsed = parser().parse_quantity_and_unit("dwa 12 sztuk");
        assert_eq!(parsed.quantity, Some(12));
        assert_eq!(parsed.unit, Some(UnitType::Szt));
    }

    #[test]
    fn test_multi_word_unit_alias() {
        let parsed = parser().parse_quantity_and_unit("trzy ka gie");
        assert_eq!(parsed.quantity, Some(3));
        assert_eq!(parsed.unit, Some(UnitType::Kg));
    }

    #[test]
    fn test_unit_alias_with_diacritics() {
        let parsed = parser().parse_quantity_and_unit("dwadzieścia sześć metrów");
        assert_eq!(parsed.quantity, Some(26));
        assert_eq!(parsed.unit, Some(UnitType::M));
    }

    #[test]
    fn test_quantity_without_unit_is_ok() {
        let parsed = parser().parse_quantity_and_unit("siedem");
        assert_eq!(parsed.quantity, Some(7));
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.status, ParseStatus::Ok);
        assert!(parsed.debug.iter().any(|l| l.contains("no unit alias")));
    }

    #[test]
    fn test_trigger_without_number_warns() {
        match parser().parse("rura ILOŚĆ dużo") {
            VoiceCommandResult::Item {
                name,
                quantity,
                status,
                ..
            } => {
                assert_eq!(name, "rura ILOŚĆ dużo");
                assert_eq!(quantity, None);
                assert_eq!(status, ParseStatus::Warning);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_trigger_needs_word_boundary() {
        assert!(find_quantity_trigger("nadilosc 5").is_none());
        assert!(find_quantity_trigger("iloscią 5").is_none());
        assert_eq!(find_quantity_trigger("rura Ilości 5"), Some((5, 12)));
    }

    #[test]
    fn test_plain_item_fallback() {
        match parser().parse("  gniazdo podwójne ") {
            VoiceCommandResult::Item {
                name,
                quantity,
                status,
                ..
            } => {
                assert_eq!(name, "gniazdo podwójne");
                assert_eq!(quantity, None);
                assert_eq!(status, ParseStatus::Ok);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_words_with_offsets() {
        let words = words_with_offsets(" ab  cd\tę");
        assert_eq!(words, vec![(1, "ab"), (5, "cd"), (8, "ę")]);
    }
}
