// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Code mode
// ============================================================================

/// Near-miss spelling prefix for fuzzy code mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyPrefix {
    /// Token prefix (matched after lowercasing and Polish folding)
    pub prefix: String,
    /// Output appended to the code
    pub symbol: String,
}

impl FuzzyPrefix {
    fn new(prefix: &str, symbol: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// Code mode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeModeConfig {
    /// Ordered prefix table, first match wins
    #[serde(default = "default_fuzzy_prefixes")]
    pub fuzzy_prefixes: Vec<FuzzyPrefix>,
    /// Leading tokens searched for the "kod" trigger word
    #[serde(default = "default_trigger_window")]
    pub trigger_window: usize,
}

fn default_fuzzy_prefixes() -> Vec<FuzzyPrefix> {
    vec![
        // "-"
        FuzzyPrefix::new("mysl", "-"),
        FuzzyPrefix::new("misl", "-"),
        FuzzyPrefix::new("kresk", "-"),
        FuzzyPrefix::new("minu", "-"),
        // "/"
        FuzzyPrefix::new("fles", "/"),
        FuzzyPrefix::new("sles", "/"),
        FuzzyPrefix::new("slas", "/"),
        FuzzyPrefix::new("ukos", "/"),
        FuzzyPrefix::new("lama", "/"),
        // "V"
        FuzzyPrefix::new("fau", "V"),
        FuzzyPrefix::new("fal", "V"),
        FuzzyPrefix::new("faw", "V"),
        // "Q"
        FuzzyPrefix::new("kup", "Q"),
        FuzzyPrefix::new("kol", "Q"),
        FuzzyPrefix::new("kuu", "Q"),
    ]
}

fn default_trigger_window() -> usize {
    3
}

impl Default for CodeModeConfig {
    fn default() -> Self {
        Self {
            fuzzy_prefixes: default_fuzzy_prefixes(),
            trigger_window: default_trigger_window(),
        }
    }
}

// ============================================================================
// Voice commands
// ============================================================================

/// Voice command settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommandConfig {
    /// Leading words compared against marker trigger phrases
    #[serde(default = "default_max_marker_tokens")]
    pub max_marker_tokens: usize,
}

fn default_max_marker_tokens() -> usize {
    6
}

impl Default for VoiceCommandConfig {
    fn default() -> Self {
        Self {
            max_marker_tokens: default_max_marker_tokens(),
        }
    }
}

// ============================================================================
// Parser configuration
// ============================================================================

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub code_mode: CodeModeConfig,
    #[serde(default)]
    pub voice_command: VoiceCommandConfig,
}

impl ParserConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("cannot resolve config directory"))?;
        let app_dir = config_dir.join("SpisVoice");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("parser.json"))
    }

    /// Load from the default location, defaults when the file is missing
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("loading parser config from {:?}", path);

        if !path.exists() {
            tracing::info!("parser config not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ParserConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("parser config saved to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.voice_command.max_marker_tokens == 0 {
            anyhow::bail!("voice_command.max_marker_tokens must be at least 1");
        }
        if self.code_mode.trigger_window == 0 {
            anyhow::bail!("code_mode.trigger_window must be at least 1");
        }
        if let Some(entry) = self
            .code_mode
            .fuzzy_prefixes
            .iter()
            .find(|entry| entry.prefix.trim().is_empty())
        {
            anyhow::bail!("fuzzy prefix for symbol {:?} is empty", entry.symbol);
        }
        Ok(())
    }
}
