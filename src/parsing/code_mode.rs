//! Code mode
//!
//! Decodes a fully spelled identifier ("igrek de igrek trzy na jeden i pół")
//! into a compact code ("YDY3x1,5"):
//! 1. fast path for an utterance that already is a code
//! 2. fraction pre-pass ("dwa i pół" -> "2,5", "trzy łamane przez cztery" -> "3/4")
//! 3. token scan with an open numeric segment (hundreds, tens, teens, ones)
//! 4. uppercase, restore the multiplication `x`, filter to the code alphabet

use crate::config::CodeModeConfig;
use crate::parsing::fuzzy::{is_y_mistranscription, FuzzySymbolMatcher};
use crate::parsing::rules::{code_punctuation_for, letter_for, CONNECTOR_WORD, HALF_WORD, MULTIPLY_MARKER};
use crate::parsing::spoken_number::{hundreds_value, normalize_polish, ones_value, parse_number, tens_value, word_value};

/// Token separators besides whitespace
const TOKEN_SEPARATORS: &[char] = &[':', ';', '.', '!', '?', '-', '_'];

/// Widest window tried when gluing a split letter name
const MAX_GLUED_TOKENS: usize = 3;

const ONE_AND_HALF_WORD: &str = "poltora";
const FRACTION_BAR_WORD: &str = "lamane";
const FRACTION_BAR_PREPOSITION: &str = "przez";

/// Ordinal denominators ("jedna druga", "trzy czwarte")
const DENOMINATORS: &[(&str, u32)] = &[
    ("druga", 2),
    ("drugie", 2),
    ("trzecia", 3),
    ("trzecie", 3),
    ("czwarta", 4),
    ("czwarte", 4),
    ("piata", 5),
    ("piate", 5),
    ("szosta", 6),
    ("szoste", 6),
    ("osma", 8),
    ("osme", 8),
];

/// Code mode output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeModeResult {
    pub normalized: String,
    /// Tokens after the fraction pre-pass
    pub tokens: Vec<String>,
}

enum NumberWord {
    Zero,
    Ones(u32),
    Teens(u32),
    Tens(u32),
    Hundreds(u32),
}

impl NumberWord {
    fn classify(token: &str) -> Option<Self> {
        if let Some(value) = hundreds_value(token) {
            return Some(Self::Hundreds(value));
        }
        if let Some(value) = tens_value(token) {
            return Some(Self::Tens(value));
        }
        match ones_value(token)? {
            0 => Some(Self::Zero),
            value @ 1..=9 => Some(Self::Ones(value)),
            value => Some(Self::Teens(value)),
        }
    }
}

/// Open numeric segment
#[derive(Debug, Default)]
struct Segment {
    value: u32,
    open: bool,
    has_hundreds: bool,
    has_tens: bool,
    has_teens: bool,
}

impl Segment {
    fn flush(&mut self, output: &mut String) {
        if self.open {
            output.push_str(&self.value.to_string());
        }
        *self = Self::default();
    }

    fn push(&mut self, word: NumberWord, output: &mut String) {
        match word {
            NumberWord::Zero => {
                self.flush(output);
                output.push('0');
            }
            NumberWord::Hundreds(value) => {
                if self.has_hundreds || self.has_tens || self.has_teens {
                    self.flush(output);
                }
                self.add(value);
                self.has_hundreds = true;
            }
            NumberWord::Tens(value) => {
                if self.has_tens || self.has_teens {
                    self.flush(output);
                }
                self.add(value);
                self.has_tens = true;
            }
            NumberWord::Teens(value) => {
                if self.has_tens || self.has_teens {
                    self.flush(output);
                }
                self.add(value);
                self.has_teens = true;
            }
            // Teens are atomic, so they never take a ones word
            NumberWord::Ones(value) => {
                if self.has_teens || !(self.has_hundreds || self.has_tens) {
                    self.flush(output);
                }
                self.add(value);
            }
        }
    }

    fn add(&mut self, value: u32) {
        self.value += value;
        self.open = true;
    }
}

/// Spelled code normalizer
pub struct CodeModeNormalizer {
    fuzzy: FuzzySymbolMatcher,
}

impl CodeModeNormalizer {
    pub fn new(config: &CodeModeConfig) -> Self {
        Self {
            fuzzy: FuzzySymbolMatcher::new(&config.fuzzy_prefixes),
        }
    }

    /// Normalize a spelled code; `enable_fuzzy` turns on the prefix table
    pub fn normalize(&self, raw_text: &str, enable_fuzzy: bool) -> CodeModeResult {
        let trimmed = raw_text.trim();
        if is_finished_code(trimmed) {
            tracing::debug!("code mode: passthrough {:?}", trimmed);
            return CodeModeResult {
                normalized: trimmed.to_string(),
                tokens: vec![trimmed.to_string()],
            };
        }

        let tokens = rewrite_fractions(&tokenize(trimmed));
        let mut output = String::new();
        let mut segment = Segment::default();
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index].as_str();

            if let Some((letter, width)) = glued_letter(&tokens, index) {
                segment.flush(&mut output);
                output.push_str(letter);
                index += width;
                continue;
            }

            if token == FRACTION_BAR_WORD
                && tokens.get(index + 1).map(String::as_str) == Some(FRACTION_BAR_PREPOSITION)
            {
                segment.flush(&mut output);
                output.push('/');
                index += 2;
                continue;
            }

            index += 1;

            if let Some(symbol) = code_punctuation_for(token) {
                segment.flush(&mut output);
                output.push(symbol);
            } else if is_literal(token) {
                segment.flush(&mut output);
                output.push_str(token);
            } else if let Some(word) = NumberWord::classify(token) {
                segment.push(word, &mut output);
            } else if let Some(letter) = bare_letter(token) {
                segment.flush(&mut output);
                output.push(letter);
            } else if let Some(symbol) = enable_fuzzy.then(|| self.fuzzy.try_match(token)).flatten() {
                segment.flush(&mut output);
                output.push_str(symbol);
            } else if is_y_mistranscription(token) {
                segment.flush(&mut output);
                output.push('Y');
            } else {
                tracing::trace!("code mode: skipped token {:?}", token);
            }
        }
        segment.flush(&mut output);

        let normalized = finalize(&output);
        tracing::debug!("code mode: {:?} -> {:?} (fuzzy={})", trimmed, normalized, enable_fuzzy);

        CodeModeResult { normalized, tokens }
    }
}

impl Default for CodeModeNormalizer {
    fn default() -> Self {
        Self::new(&CodeModeConfig::default())
    }
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | '+' | '-' | 'x')
}

/// One word holding a digit and nothing outside the code alphabet
fn is_finished_code(text: &str) -> bool {
    !text.is_empty()
        && !text.chars().any(char::is_whitespace)
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().all(is_code_char)
}

fn tokenize(text: &str) -> Vec<String> {
    normalize_polish(&text.to_lowercase())
        .split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c))
        .map(|part| part.trim_matches(','))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Digit literal (keeps leading zeros) or spoken number
fn number_at(tokens: &[String], index: usize) -> Option<(String, usize)> {
    let token = tokens.get(index)?;
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return Some((token.clone(), 1));
    }
    parse_number(tokens, index).map(|number| (number.value.to_string(), number.consumed))
}

/// Decimal digits for 1/2 or 3/4 spelled as an ordinal fraction
fn ordinal_fraction(tokens: &[String], index: usize) -> Option<&'static str> {
    let numerator = tokens
        .get(index)
        .and_then(|t| ones_value(t))
        .filter(|v| (1..=9).contains(v))?;
    let denominator = tokens.get(index + 1).and_then(|t| {
        DENOMINATORS
            .iter()
            .find(|(word, _)| *word == t.as_str())
            .map(|(_, value)| *value)
    })?;

    if numerator * 2 == denominator {
        Some("5")
    } else if numerator * 4 == denominator * 3 {
        Some("75")
    } else {
        None
    }
}

/// Fraction starting with a number at `index`, with the tokens it spans
fn fraction_at(tokens: &[String], index: usize) -> Option<(String, usize)> {
    let (whole, consumed) = number_at(tokens, index)?;
    let next = index + consumed;

    match tokens.get(next)?.as_str() {
        CONNECTOR_WORD => {
            if tokens.get(next + 1).map(String::as_str) == Some(HALF_WORD) {
                return Some((format!("{},5", whole), consumed + 2));
            }
            let decimals = ordinal_fraction(tokens, next + 1)?;
            Some((format!("{},{}", whole, decimals), consumed + 3))
        }
        FRACTION_BAR_WORD => {
            let mut denominator_at = next + 1;
            if tokens.get(denominator_at).map(String::as_str) == Some(FRACTION_BAR_PREPOSITION) {
                denominator_at += 1;
            }
            let (denominator, width) = number_at(tokens, denominator_at)?;
            Some((format!("{}/{}", whole, denominator), denominator_at + width - index))
        }
        _ => None,
    }
}

fn rewrite_fractions(tokens: &[String]) -> Vec<String> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        if tokens[index] == ONE_AND_HALF_WORD {
            result.push("1,5".to_string());
            index += 1;
        } else if let Some((fraction, width)) = fraction_at(tokens, index) {
            result.push(fraction);
            index += width;
        } else {
            result.push(tokens[index].clone());
            index += 1;
        }
    }

    result
}

/// Token that means something by itself and must not be glued
fn stands_alone(token: &str) -> bool {
    letter_for(token).is_some()
        || word_value(token).is_some()
        || code_punctuation_for(token).is_some()
        || token.chars().any(|c| c.is_ascii_digit())
}

/// Letter name spread over up to three tokens ("i grek" -> Y)
fn glued_letter(tokens: &[String], index: usize) -> Option<(&'static str, usize)> {
    (1..=MAX_GLUED_TOKENS).rev().find_map(|width| {
        let window = tokens.get(index..index + width)?;
        if width > 1 && window.iter().any(|part| stands_alone(part)) {
            return None;
        }
        letter_for(&window.concat()).map(|letter| (letter, width))
    })
}

fn is_literal(token: &str) -> bool {
    token.contains(',') || token.contains('/') || token.chars().any(|c| c.is_ascii_digit())
}

fn bare_letter(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => Some(ch.to_ascii_uppercase()),
        _ => None,
    }
}

fn finalize(buffer: &str) -> String {
    let chars: Vec<char> = buffer
        .to_uppercase()
        .chars()
        .map(|c| if c == MULTIPLY_MARKER { 'x' } else { c })
        .collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if c == 'X' && between_digits {
                'x'
            } else {
                c
            }
        })
        .filter(|c| is_code_char(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        CodeModeNormalizer::default().normalize(text, false).normalized
    }

    fn normalize_fuzzy(text: &str) -> String {
        CodeModeNormalizer::default().normalize(text, true).normalized
    }

    #[test]
    fn test_spoken_digits_and_letters() {
        assert_eq!(normalize("a d dziewięć osiem zet cztery"), "AD98Z4");
        assert_eq!(normalize("a de 9 8 z 4"), "AD98Z4");
        assert_eq!(normalize("zet jeden dwa trzy"), "Z123");
        assert_eq!(normalize("pięć sześć siedem"), "567");
    }

    #[test]
    fn test_number_segments() {
        assert_eq!(normalize("sto czterdziesci dwa"), "142");
        assert_eq!(normalize("dziewiecset dziesiec"), "910");
        assert_eq!(normalize("a d sto czterdziesci dwa z"), "AD142Z");
        assert_eq!(normalize("czternascie dwadziescia dziewiec sto"), "1429100");
    }

    #[test]
    fn test_zero_never_merges() {
        assert_eq!(normalize("dziesiec zero zero"), "1000");
        assert_eq!(normalize("zero sto"), "0100");
    }

    #[test]
    fn test_teens_are_atomic() {
        assert_eq!(normalize("dwanascie trzy"), "123");
        assert_eq!(normalize("sto dwanascie trzy"), "1123");
    }

    #[test]
    fn test_larger_words_join_a_ones_segment() {
        assert_eq!(normalize("trzy dwanascie"), "15");
        assert_eq!(normalize("piec dwadziescia"), "25");
        assert_eq!(normalize("dwa sto"), "102");
        assert_eq!(normalize("zet dwa sto a"), "Z102A");
    }

    #[test]
    fn test_passthrough_of_finished_code() {
        assert_eq!(normalize("1429100"), "1429100");
        assert_eq!(normalize(" CH4-150/BAX1 "), "CH4-150/BAX1");
    }

    #[test]
    fn test_lowercase_code_word_is_rescanned() {
        let result = CodeModeNormalizer::default().normalize("b16", false);
        assert_eq!(result.tokens, vec!["b16"]);
        assert_eq!(result.normalized, "B16");

        let result = CodeModeNormalizer::default().normalize("ch4-150", false);
        assert_eq!(result.tokens, vec!["ch4", "150"]);
        assert_eq!(result.normalized, "CH4150");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(normalize("a-b c"), "ABC");
        assert_eq!(normalize("a myślnik 12"), "A-12");
        assert_eq!(normalize("a kropka 1"), "A.1");
        assert_eq!(normalize("a slesz 1"), "A/1");
        assert_eq!(normalize("a plus 1"), "A+1");
        assert_eq!(normalize("a łamane przez be"), "A/B");
        assert_eq!(normalize("a kropka 0204 zet 2035"), "A.0204Z2035");
    }

    #[test]
    fn test_q_and_v_aliases() {
        assert_eq!(normalize("ku 1"), "Q1");
        assert_eq!(normalize("fał 2"), "V2");
    }

    #[test]
    fn test_fuzzy_prefixes() {
        assert_eq!(normalize_fuzzy("faul mysl dwanascie"), "V-12");
        assert_eq!(normalize_fuzzy("falsz mysl nic dwanascie"), "V-12");
        assert_eq!(normalize_fuzzy("kup flesz trzy"), "Q/3");
        assert_eq!(normalize_fuzzy("kol ukosnie nic trzy"), "Q/3");
    }

    #[test]
    fn test_fuzzy_prefixes_need_fuzzy_mode() {
        assert_eq!(normalize("faul mysl dwanascie"), "12");
    }

    #[test]
    fn test_y_mistranscription_without_fuzzy() {
        assert_eq!(normalize("igreka de gry"), "YDY");
    }

    #[test]
    fn test_glued_letter_names() {
        assert_eq!(normalize("i grek de i grek"), "YDY");
        assert_eq!(normalize("d e"), "DE");
    }

    #[test]
    fn test_dimensions_and_fractions() {
        assert_eq!(normalize("igrek de igrek trzy na jeden i pół"), "YDY3x1,5");
        assert_eq!(normalize("dwa i jedna druga"), "2,5");
        assert_eq!(normalize("jeden i dwie czwarte"), "1,5");
        assert_eq!(normalize("dwa i trzy czwarte"), "2,75");
        assert_eq!(normalize("półtora"), "1,5");
        assert_eq!(normalize("trzy łamane przez cztery"), "3/4");
        assert_eq!(normalize("b 3x3"), "B3x3");
    }

    #[test]
    fn test_unsupported_fraction_is_not_rewritten() {
        let result = CodeModeNormalizer::default().normalize("dwa i jedna trzecia", false);
        assert_eq!(result.tokens, vec!["dwa", "i", "jedna", "trzecia"]);
        assert_eq!(result.normalized, "2I1");
    }

    #[test]
    fn test_tokens_reported() {
        let result = CodeModeNormalizer::default().normalize("Igrek: trzy i pół", false);
        assert_eq!(result.tokens, vec!["igrek", "3,5"]);
        assert_eq!(result.normalized, "Y3,5");
    }

    #[test]
    fn test_output_alphabet() {
        let inputs = [
            "Ąż? dwanaście ## kabel",
            "igrek iks dwa x trzy",
            "zażółć gęślą jaźń",
            "a, b; c! d? e_f",
            "",
        ];
        for input in inputs {
            let normalized = normalize_fuzzy(input);
            assert!(
                normalized.chars().all(is_code_char),
                "{:?} -> {:?}",
                input,
                normalized
            );
        }
    }
}
