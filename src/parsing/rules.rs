//! Vocabulary tables
//!
//! Letter names, unit words, spoken symbols, command trigger phrases and the
//! default [`BasicTokenProvider`] dictionary built from them. All keys are
//! lowercase and folded with [`normalize_polish`].

use std::collections::HashMap;

use crate::parsing::spoken_number::{normalize_polish, word_value};
use crate::parsing::tokenizer::TokenProvider;
use crate::parsing::types::{Token, UnitType};

/// Multiplication marker in code mode; rendered as lowercase `x`
pub const MULTIPLY_MARKER: char = '×';

/// Connector word joining a number and its fraction ("dwa i pół")
pub const CONNECTOR_WORD: &str = "i";

/// Half fraction word
pub const HALF_WORD: &str = "pol";

/// Unit alias, possibly spanning several words
#[derive(Debug, Clone)]
pub struct UnitAlias {
    pub unit: UnitType,
    pub words: Vec<&'static str>,
}

/// Marker command trigger phrase
#[derive(Debug, Clone)]
pub struct MarkerAlias {
    pub phrase: &'static str,
    pub words: Vec<&'static str>,
}

lazy_static::lazy_static! {
    /// Spoken letter names
    static ref LETTER_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("a", "A"),
        ("be", "B"),
        ("ce", "C"),
        ("de", "D"),
        ("e", "E"),
        ("ef", "F"),
        ("gie", "G"),
        ("ha", "H"),
        ("jot", "J"),
        ("ka", "K"),
        ("el", "L"),
        ("em", "M"),
        ("en", "N"),
        ("o", "O"),
        ("pe", "P"),
        ("ku", "Q"),
        ("er", "R"),
        ("es", "S"),
        ("te", "T"),
        ("u", "U"),
        ("fau", "V"),
        ("fal", "V"),
        ("wu", "W"),
        ("iks", "X"),
        ("igrek", "Y"),
        ("ygrek", "Y"),
        ("igreg", "Y"),
        ("igrekg", "Y"),
        ("greg", "Y"),
        ("zet", "Z"),
    ]);

    /// Symbol words of the item-text pipeline
    static ref SYMBOL_WORDS: HashMap<&'static str, &'static str> = HashMap::from([
        ("na", "x"),
        ("razy", "x"),
        ("x", "x"),
        ("myslnik", "-"),
        ("minus", "-"),
        ("kreska", "-"),
        ("slash", "/"),
        ("slesz", "/"),
        ("ukosnik", "/"),
        ("kropka", "."),
        ("plus", "+"),
        ("przecinek", ","),
    ]);

    /// Punctuation words of code mode
    static ref CODE_PUNCTUATION_WORDS: HashMap<&'static str, char> = HashMap::from([
        ("kropka", '.'),
        ("przecinek", ','),
        ("myslnik", '-'),
        ("minus", '-'),
        ("kreska", '-'),
        ("slash", '/'),
        ("slesz", '/'),
        ("ukosnik", '/'),
        ("lamane", '/'),
        ("plus", '+'),
        ("na", MULTIPLY_MARKER),
        ("razy", MULTIPLY_MARKER),
        ("przez", MULTIPLY_MARKER),
    ]);

    /// Single-word unit names for the tokenizer dictionary
    static ref UNIT_WORDS: HashMap<&'static str, UnitType> = UNIT_ALIASES
        .iter()
        .filter(|alias| alias.words.len() == 1)
        .map(|alias| (alias.words[0], alias.unit))
        .collect();

    /// Unit aliases, longest first; ties keep declaration order
    pub static ref UNIT_ALIASES: Vec<UnitAlias> = {
        let mut aliases: Vec<UnitAlias> = UNIT_TABLE
            .iter()
            .map(|(unit, words)| UnitAlias {
                unit: *unit,
                words: words.to_vec(),
            })
            .collect();
        aliases.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
        aliases
    };

    /// Marker trigger phrases, matched in order
    pub static ref MARKER_ALIASES: Vec<MarkerAlias> = [
        "dodaj marker",
        "dodaj markier",
        "dodac marker",
        "dodac markier",
        "duda i marker",
        "duda i markier",
    ]
    .into_iter()
    .map(|phrase| MarkerAlias {
        phrase,
        words: phrase.split(' ').collect(),
    })
    .collect();
}

/// Unit surface forms
const UNIT_TABLE: &[(UnitType, &[&str])] = &[
    (UnitType::Kg, &["kg"]),
    (UnitType::Kg, &["kilo"]),
    (UnitType::Kg, &["kilogram"]),
    (UnitType::Kg, &["kilograma"]),
    (UnitType::Kg, &["kilogramy"]),
    (UnitType::Kg, &["kilogramow"]),
    (UnitType::Kg, &["ka", "gie"]),
    (UnitType::Kg, &["ka", "g"]),
    (UnitType::M, &["m"]),
    (UnitType::M, &["metr"]),
    (UnitType::M, &["metry"]),
    (UnitType::M, &["metra"]),
    (UnitType::M, &["metrow"]),
    (UnitType::Cm, &["cm"]),
    (UnitType::Cm, &["ce", "em"]),
    (UnitType::Cm, &["centymetr"]),
    (UnitType::Cm, &["centymetry"]),
    (UnitType::Cm, &["centymetra"]),
    (UnitType::Cm, &["centymetrow"]),
    (UnitType::Szt, &["szt"]),
    (UnitType::Szt, &["sztuka"]),
    (UnitType::Szt, &["sztuki"]),
    (UnitType::Szt, &["sztuk"]),
    (UnitType::Op, &["op"]),
    (UnitType::Op, &["opakowanie"]),
    (UnitType::Op, &["opakowania"]),
    (UnitType::Op, &["opakowan"]),
    (UnitType::Rolka, &["rolka"]),
    (UnitType::Rolka, &["rolki"]),
    (UnitType::Rolka, &["rolek"]),
    (UnitType::Kpl, &["kpl"]),
    (UnitType::Kpl, &["komplet"]),
    (UnitType::Kpl, &["komplety"]),
    (UnitType::Kpl, &["kompletow"]),
];

/// Item vocabulary known to the dictionary (not reported as unknown)
const KNOWN_WORDS: &[&str] = &[
    "hager",
    "legrand",
    "schneider",
    "abb",
    "eaton",
    "bax",
    "kabel",
    "przewod",
    "rura",
    "peszel",
    "korytko",
    "listwa",
    "puszka",
    "gniazdo",
    "wtyczka",
    "wylacznik",
    "bezpiecznik",
    "rozdzielnica",
    "stycznik",
    "przekaznik",
    "zacisk",
    "zlaczka",
    "dlawik",
    "opaska",
    "tasma",
    "oprawa",
    "lampa",
    "sruba",
    "wkret",
    "kolek",
];

/// Quantity trigger words ("ilość" and its inflections)
pub const QUANTITY_TRIGGERS: &[&str] = &["ilość", "ilosc", "ilości", "ilosci", "ILOŚĆ", "ILOŚCI"];

/// Code-mode trigger aliases (folded)
pub const CODE_TRIGGER_ALIASES: &[&str] = &["kod", "kot", "kat"];

/// Letter for a spoken letter name
pub fn letter_for(word: &str) -> Option<&'static str> {
    LETTER_NAMES.get(word).copied()
}

/// Symbol for a symbol word of the item-text pipeline
pub fn symbol_for(word: &str) -> Option<&'static str> {
    SYMBOL_WORDS.get(word).copied()
}

/// Symbol for a code-mode punctuation word
pub fn code_punctuation_for(word: &str) -> Option<char> {
    CODE_PUNCTUATION_WORDS.get(word).copied()
}

/// Unit for a single unit word
pub fn unit_for(word: &str) -> Option<UnitType> {
    UNIT_WORDS.get(word).copied()
}

/// Default dictionary for the item-text tokenizer
///
/// Lookup order: symbols, connector, fraction, units, numbers, letters,
/// known vocabulary, bare single letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTokenProvider;

impl TokenProvider for BasicTokenProvider {
    fn token_for(&self, word: &str) -> Option<Token> {
        if word.is_empty() {
            return None;
        }
        let folded = normalize_polish(word);
        let key = folded.as_str();

        if let Some(symbol) = symbol_for(key) {
            return Some(Token::symbol(symbol));
        }
        if key == CONNECTOR_WORD {
            return Some(Token::connector(CONNECTOR_WORD));
        }
        if key == HALF_WORD {
            return Some(Token::fraction("0,5"));
        }
        if let Some(unit) = unit_for(key) {
            return Some(Token::unit(unit));
        }
        if let Some(value) = word_value(key) {
            return Some(Token::number(value.to_string(), Some(value)));
        }
        if let Some(letter) = letter_for(key) {
            return Some(Token::letter(letter));
        }
        if KNOWN_WORDS.iter().any(|known| *known == key) {
            return Some(Token::word(word.to_uppercase()));
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                Some(Token::letter(ch.to_ascii_uppercase().to_string()))
            }
            _ => None,
        }
    }
}
