//! Transcript tokenizer
//!
//! Splits a transcript on whitespace and classifies each word through a
//! pluggable [`TokenProvider`] dictionary, falling back to literal numbers and
//! uppercased words.

use crate::parsing::rules::BasicTokenProvider;
use crate::parsing::types::{Token, TokenizationResult};

/// Punctuation trimmed from both ends of a word before lookup
const TRIM_CHARS: &[char] = &[',', '.', ';', ':'];

/// Word -> pre-classified token lookup
pub trait TokenProvider {
    /// `word` is lowercased and punctuation-trimmed
    fn token_for(&self, word: &str) -> Option<Token>;
}

/// Tokenizer
pub struct Tokenizer<P: TokenProvider = BasicTokenProvider> {
    provider: P,
}

impl<P: TokenProvider> Tokenizer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Tokenize a transcript, preserving input word order
    pub fn tokenize(&self, text: &str) -> TokenizationResult {
        let mut tokens = Vec::new();
        let mut unknown_words: Vec<String> = Vec::new();

        for raw_word in text.split_whitespace() {
            let lookup = raw_word.to_lowercase();
            let lookup = lookup.trim_matches(TRIM_CHARS);

            if let Some(token) = self.provider.token_for(lookup) {
                tokens.push(token.from_source(raw_word));
                continue;
            }

            if !lookup.is_empty() && lookup.chars().all(|c| c.is_ascii_digit()) {
                let mut token = Token::number(lookup, lookup.parse::<u32>().ok());
                token.source_text = Some(raw_word.to_string());
                tokens.push(token);
                continue;
            }

            if !lookup.is_empty()
                && lookup.chars().all(char::is_alphabetic)
                && !unknown_words.iter().any(|w| w == lookup)
            {
                unknown_words.push(lookup.to_string());
            }

            let mut token = Token::word(raw_word.to_uppercase());
            token.source_text = Some(raw_word.to_string());
            tokens.push(token);
        }

        TokenizationResult {
            tokens,
            unknown_words,
        }
    }
}

impl Default for Tokenizer<BasicTokenProvider> {
    fn default() -> Self {
        Self::new(BasicTokenProvider)
    }
}
