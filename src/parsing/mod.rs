//! Transcript parsing
//!
//! Turns one finished speech transcript into an inventory command.
//!
//! ## Pipeline
//! 1. Polish number words and diacritic folding (`spoken_number`)
//! 2. Dictionary tokenization (`tokenizer`, `rules`)
//! 3. Item text normalization with quantity/unit extraction (`normalizer`)
//! 4. Marker and quantity commands (`voice_command`)
//! 5. Spelled codes (`code_mode`, `fuzzy`)
//! 6. Rule priority across all of the above (`router`)

mod code_mode;
mod fuzzy;
mod inventory;
mod normalizer;
mod router;
mod rules;
mod spoken_number;
mod tokenizer;
mod types;
mod voice_command;

pub use code_mode::{CodeModeNormalizer, CodeModeResult};
pub use fuzzy::{is_y_mistranscription, FuzzySymbolMatcher};
pub use inventory::InventoryParser;
pub use normalizer::Normalizer;
pub use router::CommandRouter;
pub use rules::{BasicTokenProvider, MarkerAlias, UnitAlias, MARKER_ALIASES, UNIT_ALIASES};
pub use spoken_number::{normalize_polish, parse_number, parse_spoken_number, ParsedNumber};
pub use tokenizer::{TokenProvider, Tokenizer};
pub use types::{
    ParseOutcome, ParseStatus, Route, RoutedCommand, Token, TokenKind, TokenizationResult,
    UnitType, VoiceCommandResult,
};
pub use voice_command::{find_quantity_trigger, QuantityParse, VoiceCommandParser};
