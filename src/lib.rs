//! Polish voice-transcript parsing for inventory lists
//!
//! ```
//! use spis_voice::{CommandRouter, Route};
//!
//! let router = CommandRouter::default();
//! let routed = router.route("dodaj marker regał A", false);
//! assert_eq!(routed.route, Route::Marker);
//! ```

pub mod config;
pub mod parsing;

pub use config::{CodeModeConfig, FuzzyPrefix, ParserConfig, VoiceCommandConfig};
pub use parsing::{
    CodeModeNormalizer, CommandRouter, InventoryParser, ParseOutcome, ParseStatus, Route,
    RoutedCommand, UnitType, VoiceCommandParser, VoiceCommandResult,
};
