//! Polish spoken-number decoding (0-999)
//!
//! Number words are expected lowercased and folded to ASCII with
//! [`normalize_polish`] before lookup.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    /// 0-19
    static ref ONES: HashMap<&'static str, u32> = HashMap::from([
        ("zero", 0),
        ("jeden", 1),
        ("jedna", 1),
        ("jedno", 1),
        ("dwa", 2),
        ("dwie", 2),
        ("trzy", 3),
        ("cztery", 4),
        ("piec", 5),
        ("szesc", 6),
        ("siedem", 7),
        ("osiem", 8),
        ("dziewiec", 9),
        ("dziesiec", 10),
        ("jedenascie", 11),
        ("dwanascie", 12),
        ("trzynascie", 13),
        ("czternascie", 14),
        ("pietnascie", 15),
        ("szesnascie", 16),
        ("siedemnascie", 17),
        ("osiemnascie", 18),
        ("dziewietnascie", 19),
    ]);

    static ref TENS: HashMap<&'static str, u32> = HashMap::from([
        ("dwadziescia", 20),
        ("trzydziesci", 30),
        ("czterdziesci", 40),
        ("piecdziesiat", 50),
        ("szescdziesiat", 60),
        ("siedemdziesiat", 70),
        ("osiemdziesiat", 80),
        ("dziewiecdziesiat", 90),
    ]);

    static ref HUNDREDS: HashMap<&'static str, u32> = HashMap::from([
        ("sto", 100),
        ("dwiescie", 200),
        ("trzysta", 300),
        ("czterysta", 400),
        ("piecset", 500),
        ("szescset", 600),
        ("siedemset", 700),
        ("osiemset", 800),
        ("dziewiecset", 900),
    ]);
}

/// Decoded number and the token range it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNumber {
    pub value: u32,
    pub consumed: usize,
    pub start_index: usize,
}

/// Fold Polish diacritics to their ASCII base letters
///
/// Input is NFC-composed first so decomposed diacritics fold too.
pub fn normalize_polish(input: &str) -> String {
    input
        .nfc()
        .map(|ch| match ch {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ż' | 'ź' => 'z',
            other => other,
        })
        .collect()
}

/// Value of a 0-19 word
pub fn ones_value(word: &str) -> Option<u32> {
    ONES.get(word).copied()
}

/// Value of a 20-90 word
pub fn tens_value(word: &str) -> Option<u32> {
    TENS.get(word).copied()
}

/// Value of a 100-900 word
pub fn hundreds_value(word: &str) -> Option<u32> {
    HUNDREDS.get(word).copied()
}

/// Any single number word
pub fn word_value(word: &str) -> Option<u32> {
    ones_value(word)
        .or_else(|| tens_value(word))
        .or_else(|| hundreds_value(word))
}

/// Literal digit string in 0..=999
pub fn literal_value(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().filter(|v| *v <= 999)
}

/// Decode a number at `start`: a literal digit token, else spoken words
pub fn parse_number<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<ParsedNumber> {
    let token = tokens.get(start)?.as_ref();
    if let Some(value) = literal_value(token) {
        return Some(ParsedNumber {
            value,
            consumed: 1,
            start_index: start,
        });
    }
    parse_spoken_number(tokens, start)
}

/// Greedy spoken-number decode starting at `start`
pub fn parse_spoken_number<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<ParsedNumber> {
    let word_at = |i: usize| tokens.get(i).map(|t| t.as_ref());
    let first = word_at(start)?;

    let finish = |value: u32, index: usize| {
        Some(ParsedNumber {
            value,
            consumed: index - start,
            start_index: start,
        })
    };

    if let Some(hundreds) = hundreds_value(first) {
        let mut value = hundreds;
        let mut index = start + 1;

        if let Some(tens) = word_at(index).and_then(tens_value) {
            value += tens;
            index += 1;
            if let Some(ones) = word_at(index).and_then(ones_value).filter(|v| (1..=9).contains(v)) {
                value += ones;
                index += 1;
            }
            return finish(value, index);
        }

        if let Some(ones) = word_at(index).and_then(ones_value).filter(|v| (1..=19).contains(v)) {
            value += ones;
            index += 1;
        }
        return finish(value, index);
    }

    if let Some(tens) = tens_value(first) {
        let mut value = tens;
        let mut index = start + 1;
        if let Some(ones) = word_at(index).and_then(ones_value).filter(|v| (1..=9).contains(v)) {
            value += ones;
            index += 1;
        }
        return finish(value, index);
    }

    ones_value(first).and_then(|ones| finish(ones, start + 1))
}
