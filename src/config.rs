// File: ./src/config.rs
// Rule tables driving normalization, segmentation, and text cleaning.
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_interjections() -> Vec<String> {
    to_strings(&[
        "fast", "okay", "ok", "hey", "hi", "hello", "um", "uh", "so", "well", "alright", "right",
    ])
}

fn default_connectors() -> Vec<String> {
    to_strings(&["and", "then", "also", "plus", "next", "after that"])
}

fn default_leading_strips() -> Vec<String> {
    to_strings(&[
        "and",
        "then",
        "also",
        "plus",
        "next",
        "after that",
        "at",
        "on",
        "by",
        "today",
        "tomorrow",
    ])
}

fn default_trailing_strips() -> Vec<String> {
    to_strings(&["and", "then", "also", "plus"])
}

fn default_fallback_text() -> String {
    "Task scheduled".to_string()
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Word tables consumed by the extraction pipeline. All matching against these
/// tables is case-insensitive; multi-word entries ("after that") are matched as
/// whitespace-separated phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Conversational lead-ins stripped once from the very start of a transcript.
    #[serde(default = "default_interjections")]
    pub interjections: Vec<String>,
    /// Enumeration words that mark a boundary between two tasks.
    #[serde(default = "default_connectors")]
    pub connectors: Vec<String>,
    /// Connectors/prepositions stripped from the front of a task's text.
    #[serde(default = "default_leading_strips")]
    pub leading_strips: Vec<String>,
    /// Connectors stripped from the end of a task's text.
    #[serde(default = "default_trailing_strips")]
    pub trailing_strips: Vec<String>,
    /// Substitute for task text that cleans down to fewer than 2 characters.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            interjections: default_interjections(),
            connectors: default_connectors(),
            leading_strips: default_leading_strips(),
            trailing_strips: default_trailing_strips(),
            fallback_text: default_fallback_text(),
        }
    }
}

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::default);

impl RuleSet {
    /// The built-in rule tables, shared by every extractor that does not load
    /// its own configuration.
    pub fn defaults() -> &'static RuleSet {
        &DEFAULT_RULES
    }

    /// Load a rule set from a TOML file using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Rules file not found: '{}'",
                path.display()
            ));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read rules file '{}': {}", path.display(), e)
        })?;

        let rules: RuleSet = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse rules file '{}': {}", path.display(), e)
        })?;

        Ok(rules)
    }

    pub fn is_interjection(&self, word: &str) -> bool {
        contains_word(&self.interjections, word)
    }
}

pub(crate) fn contains_word(list: &[String], word: &str) -> bool {
    list.iter().any(|w| w.eq_ignore_ascii_case(word))
}
