//! Command router
//!
//! Single entry point for one transcript. Rules are tried in a fixed order
//! and the first one that applies wins:
//! 1. blank input
//! 2. forced code mode (caller switch)
//! 3. marker command
//! 4. quantity trigger
//! 5. spoken code trigger ("kod ...")
//! 6. plain voice command

use crate::config::ParserConfig;
use crate::parsing::code_mode::CodeModeNormalizer;
use crate::parsing::rules::CODE_TRIGGER_ALIASES;
use crate::parsing::spoken_number::normalize_polish;
use crate::parsing::types::{ParseStatus, Route, RoutedCommand, VoiceCommandResult};
use crate::parsing::voice_command::{find_quantity_trigger, words_with_offsets, VoiceCommandParser};

/// Punctuation tolerated after the code trigger word
const TRIGGER_TRIM: &[char] = &[':', ',', '.', ';'];

/// Spoken code trigger and the text around it
struct CodeTrigger {
    alias: String,
    remainder: String,
}

/// Command router
pub struct CommandRouter {
    voice_commands: VoiceCommandParser,
    code_mode: CodeModeNormalizer,
    trigger_window: usize,
}

impl CommandRouter {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            voice_commands: VoiceCommandParser::new(&config.voice_command),
            code_mode: CodeModeNormalizer::new(&config.code_mode),
            trigger_window: config.code_mode.trigger_window.max(1),
        }
    }

    /// Route one transcript
    pub fn route(&self, raw_text: &str, force_code_mode: bool) -> RoutedCommand {
        let trimmed = raw_text.trim();

        if trimmed.is_empty() {
            tracing::info!("router: empty input");
            let mut result = VoiceCommandResult::empty_input();
            result.push_debug("Router: empty input");
            return RoutedCommand::new(Route::None, result);
        }

        if force_code_mode {
            return self.route_forced(trimmed);
        }

        if let Some(mut marker) = self.voice_commands.parse_marker_command(trimmed) {
            tracing::info!("router: marker command");
            marker.push_debug("Router: marker command");
            let alias = match &marker {
                VoiceCommandResult::AddMarker { alias, .. } => Some(alias.clone()),
                _ => None,
            };
            let mut routed = RoutedCommand::new(Route::Marker, marker);
            routed.alias = alias;
            return routed;
        }

        if let Some(mut item) = self.voice_commands.parse_quantity_command(trimmed) {
            tracing::info!("router: quantity trigger");
            item.push_debug("Router: quantity trigger");
            return RoutedCommand::new(Route::Quantity, item);
        }

        if let Some(trigger) = self.detect_code_trigger(trimmed) {
            return self.route_code_trigger(trigger);
        }

        tracing::info!("router: no rule matched, plain voice command");
        let mut result = self.voice_commands.parse(trimmed);
        result.push_debug("Router: plain voice command");
        RoutedCommand::new(Route::None, result)
    }

    /// Whole utterance is a code; a quantity trigger splits code from quantity
    fn route_forced(&self, trimmed: &str) -> RoutedCommand {
        let (code_text, quantity_text) = match find_quantity_trigger(trimmed) {
            Some((start, end)) => (trimmed[..start].trim(), Some(trimmed[end..].trim())),
            None => (trimmed, None),
        };

        let code = self.code_mode.normalize(code_text, true);
        let final_name = if code.normalized.trim().is_empty() {
            code_text.to_string()
        } else {
            code.normalized.clone()
        };

        let mut debug = vec![format!(
            "Router: forced code mode {:?} -> {:?}",
            code_text, final_name
        )];

        let (quantity, unit) = match quantity_text {
            Some(tail) => {
                let parsed = self.voice_commands.parse_quantity_and_unit(tail);
                debug.extend(parsed.debug);
                (parsed.quantity, parsed.unit)
            }
            None => (None, None),
        };

        tracing::info!(
            "router: forced code mode name={:?} quantity={:?} unit={:?}",
            final_name,
            quantity,
            unit
        );

        let result = VoiceCommandResult::Item {
            name: final_name.clone(),
            quantity,
            unit,
            status: ParseStatus::Ok,
            debug,
        };

        let mut routed = RoutedCommand::new(Route::Code, result);
        routed.forced = true;
        routed.code_mode_raw = Some(code_text.to_string());
        routed.code_mode_normalized = Some(code.normalized);
        routed.code_mode_final = Some(final_name);
        routed.code_mode_tokens = code.tokens;
        routed
    }

    fn route_code_trigger(&self, trigger: CodeTrigger) -> RoutedCommand {
        let code = self.code_mode.normalize(&trigger.remainder, false);

        let result = if code.normalized.is_empty() {
            tracing::info!("router: code trigger {:?} without code", trigger.alias);
            VoiceCommandResult::plain_item(
                "",
                ParseStatus::Fail,
                vec![format!("Router: code trigger '{}' without code", trigger.alias)],
            )
        } else {
            tracing::info!("router: code trigger {:?} -> {:?}", trigger.alias, code.normalized);
            VoiceCommandResult::plain_item(
                code.normalized.clone(),
                ParseStatus::Ok,
                vec![format!(
                    "Router: code trigger '{}' -> \"{}\"",
                    trigger.alias, code.normalized
                )],
            )
        };

        let mut routed = RoutedCommand::new(Route::Code, result);
        routed.alias = Some(trigger.alias);
        routed.code_mode_raw = Some(trigger.remainder);
        routed.code_mode_final = Some(code.normalized.clone());
        routed.code_mode_normalized = Some(code.normalized);
        routed.code_mode_tokens = code.tokens;
        routed
    }

    /// Code trigger word among the first few tokens; only that word is removed
    fn detect_code_trigger(&self, text: &str) -> Option<CodeTrigger> {
        words_with_offsets(text)
            .into_iter()
            .take(self.trigger_window)
            .find_map(|(offset, word)| {
                let matched = word.trim_end_matches(TRIGGER_TRIM).to_lowercase();
                let folded = normalize_polish(&matched);
                if !CODE_TRIGGER_ALIASES.contains(&folded.as_str()) {
                    return None;
                }

                let before = text[..offset].trim();
                let after = text[offset + word.len()..].trim();
                let remainder = match (before.is_empty(), after.is_empty()) {
                    (true, _) => after.to_string(),
                    (false, true) => before.to_string(),
                    (false, false) => format!("{} {}", before, after),
                };

                Some(CodeTrigger {
                    alias: matched,
                    remainder,
                })
            })
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}
