//! Shared value types for the transcript parsing pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inventory unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitType {
    Szt,
    M,
    Op,
    Rolka,
    Kpl,
    Kg,
    Cm,
}

impl UnitType {
    /// Display label shown next to the quantity
    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Szt => "szt",
            UnitType::M => "m",
            UnitType::Op => "op",
            UnitType::Rolka => "rolka",
            UnitType::Kpl => "kpl",
            UnitType::Kg => "kg",
            UnitType::Cm => "cm",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParseStatus {
    /// Fully structured
    Ok,
    /// Partial success (unknown vocabulary, trigger without number)
    Warning,
    /// Nothing usable was extracted
    Fail,
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Letter,
    Number,
    Symbol,
    Unit,
    Connector,
    Fraction,
}

/// Token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    /// Integer value, only for whole `Number` tokens
    pub number_value: Option<u32>,
    pub unit: Option<UnitType>,
    /// Token came from the `TokenProvider` dictionary
    pub from_dictionary: bool,
    /// Raw transcript word the token was built from
    pub source_text: Option<String>,
}

impl Token {
    fn new(value: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            value: value.into(),
            kind,
            number_value: None,
            unit: None,
            from_dictionary: false,
            source_text: None,
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Word)
    }

    pub fn letter(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Letter)
    }

    pub fn number(value: impl Into<String>, number_value: Option<u32>) -> Self {
        Self {
            number_value,
            ..Self::new(value, TokenKind::Number)
        }
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Symbol)
    }

    pub fn unit(unit: UnitType) -> Self {
        Self {
            unit: Some(unit),
            ..Self::new(unit.label(), TokenKind::Unit)
        }
    }

    pub fn connector(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Connector)
    }

    pub fn fraction(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Fraction)
    }

    /// Mark the token as a dictionary hit for the given raw word
    pub fn from_source(mut self, raw: &str) -> Self {
        self.from_dictionary = true;
        self.source_text = Some(raw.to_string());
        self
    }

    pub fn is_alphanumeric(&self) -> bool {
        matches!(self.kind, TokenKind::Letter | TokenKind::Number)
    }
}

/// Tokenizer output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenizationResult {
    pub tokens: Vec<Token>,
    /// Alphabetic words without a dictionary entry, first-seen order, no duplicates
    pub unknown_words: Vec<String>,
}

/// Result of the item-text pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub normalized_text: Option<String>,
    pub status: ParseStatus,
    pub debug: Vec<String>,
    pub extracted_quantity: Option<u32>,
    pub extracted_unit: Option<UnitType>,
}

impl ParseOutcome {
    /// Failed outcome with a single debug line
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            normalized_text: None,
            status: ParseStatus::Fail,
            debug: vec![reason.into()],
            extracted_quantity: None,
            extracted_unit: None,
        }
    }
}

/// Decoded voice command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceCommandResult {
    /// Add a section marker row
    AddMarker {
        name: String,
        alias: String,
        debug: Vec<String>,
    },
    /// Deliberate no-op, not an error
    Ignored { reason: String, debug: Vec<String> },
    /// Inventory item row
    Item {
        name: String,
        quantity: Option<u32>,
        unit: Option<UnitType>,
        status: ParseStatus,
        debug: Vec<String>,
    },
}

impl VoiceCommandResult {
    /// Item without quantity and unit
    pub fn plain_item(name: impl Into<String>, status: ParseStatus, debug: Vec<String>) -> Self {
        VoiceCommandResult::Item {
            name: name.into(),
            quantity: None,
            unit: None,
            status,
            debug,
        }
    }

    /// Failed item for blank input
    pub fn empty_input() -> Self {
        Self::plain_item("", ParseStatus::Fail, vec!["VoiceCommand: empty input".to_string()])
    }

    pub fn debug(&self) -> &[String] {
        match self {
            VoiceCommandResult::AddMarker { debug, .. }
            | VoiceCommandResult::Ignored { debug, .. }
            | VoiceCommandResult::Item { debug, .. } => debug,
        }
    }

    pub(crate) fn push_debug(&mut self, line: impl Into<String>) {
        match self {
            VoiceCommandResult::AddMarker { debug, .. }
            | VoiceCommandResult::Ignored { debug, .. }
            | VoiceCommandResult::Item { debug, .. } => debug.push(line.into()),
        }
    }
}

/// Which router rule produced the command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Route {
    Marker,
    Quantity,
    Code,
    None,
}

/// Router output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedCommand {
    pub route: Route,
    pub result: VoiceCommandResult,
    /// Trigger phrase or word that selected the route
    pub alias: Option<String>,
    /// Code mode was forced by the caller
    pub forced: bool,
    pub code_mode_raw: Option<String>,
    pub code_mode_normalized: Option<String>,
    pub code_mode_final: Option<String>,
    pub code_mode_tokens: Vec<String>,
}

impl RoutedCommand {
    pub fn new(route: Route, result: VoiceCommandResult) -> Self {
        Self {
            route,
            result,
            alias: None,
            forced: false,
            code_mode_raw: None,
            code_mode_normalized: None,
            code_mode_final: None,
            code_mode_tokens: Vec::new(),
        }
    }

    /// Debug trace lines for logging
    pub fn debug_lines(&self) -> &[String] {
        self.result.debug()
    }
}
