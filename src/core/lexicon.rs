//! Static lookup tables: the shop query lexicon and the onboarding rules.
//!
//! Both tables are embedded at build time and can be replaced from disk at
//! startup. Entry order is preserved everywhere because every lookup is
//! first-match-wins.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::core::age::AgeBand;
use crate::models::Rule;

const EMBEDDED_LEXICON: &str = include_str!("../../data/lexicon.toml");
const EMBEDDED_RULES: &str = include_str!("../../data/rules.json");

/// Errors raised while loading lookup tables
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lexicon: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid rules table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid table entry: {0}")]
    InvalidEntry(String),
}

/// Age descriptor word ("toddler", "tween", ...)
#[derive(Debug, Clone, Deserialize)]
pub struct AgeWord {
    pub word: String,
    pub band: AgeBand,
}

/// Interest keyword and the filter tags it maps to
#[derive(Debug, Clone, Deserialize)]
pub struct InterestEntry {
    pub keyword: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub play_types: Vec<String>,
}

/// Ordered query lexicon
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    cues: Vec<String>,
    #[serde(rename = "age_word", default)]
    age_words: Vec<AgeWord>,
    #[serde(rename = "interest", default)]
    interests: Vec<InterestEntry>,
}

impl Lexicon {
    pub fn from_toml(raw: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = toml::from_str(raw)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn embedded() -> Result<Self, LexiconError> {
        Self::from_toml(EMBEDDED_LEXICON)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        Self::from_toml(&read_table(path.as_ref())?)
    }

    // An empty needle would match every phrase
    fn validate(&self) -> Result<(), LexiconError> {
        if let Some(cue) = self.cues.iter().find(|c| c.trim().is_empty()) {
            return Err(LexiconError::InvalidEntry(format!("blank cue phrase {:?}", cue)));
        }
        if self.age_words.iter().any(|w| w.word.is_empty()) {
            return Err(LexiconError::InvalidEntry("blank age word".to_string()));
        }
        if self.interests.iter().any(|i| i.keyword.is_empty()) {
            return Err(LexiconError::InvalidEntry("blank interest keyword".to_string()));
        }
        Ok(())
    }

    pub fn cues(&self) -> &[String] {
        &self.cues
    }

    pub fn age_words(&self) -> &[AgeWord] {
        &self.age_words
    }

    pub fn interests(&self) -> &[InterestEntry] {
        &self.interests
    }

    /// First age word (in table order) occurring anywhere in `text`
    pub fn age_word_in(&self, text: &str) -> Option<AgeBand> {
        self.age_words
            .iter()
            .find(|w| text.contains(w.word.as_str()))
            .map(|w| w.band)
    }

    /// Exact keyword match, else the first keyword contained in `phrase`
    pub fn interest_for(&self, phrase: &str) -> Option<&InterestEntry> {
        self.interests
            .iter()
            .find(|i| i.keyword == phrase)
            .or_else(|| {
                self.interests
                    .iter()
                    .find(|i| phrase.contains(i.keyword.as_str()))
            })
    }
}

/// Ordered condition -> need rules
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn from_json(raw: &str) -> Result<Self, LexiconError> {
        let rules: Vec<Rule> = serde_json::from_str(raw)?;
        Ok(Self { rules })
    }

    pub fn embedded() -> Result<Self, LexiconError> {
        Self::from_json(EMBEDDED_RULES)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        Self::from_json(&read_table(path.as_ref())?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Every table the engine reads
#[derive(Debug, Clone)]
pub struct Tables {
    pub lexicon: Lexicon,
    pub rules: RuleTable,
}

impl Tables {
    pub fn embedded() -> Result<Self, LexiconError> {
        Ok(Self {
            lexicon: Lexicon::embedded()?,
            rules: RuleTable::embedded()?,
        })
    }

    /// Embedded tables with optional on-disk replacements
    pub fn load(lexicon_path: Option<&str>, rules_path: Option<&str>) -> Result<Self, LexiconError> {
        let lexicon = match lexicon_path {
            Some(path) => Lexicon::load(path)?,
            None => Lexicon::embedded()?,
        };
        let rules = match rules_path {
            Some(path) => RuleTable::load(path)?,
            None => RuleTable::embedded()?,
        };

        Ok(Self { lexicon, rules })
    }
}

/// Embedded tables shared by the free-function entry points
pub static DEFAULT_TABLES: Lazy<Tables> =
    Lazy::new(|| Tables::embedded().expect("embedded tables are well-formed"));

fn read_table(path: &Path) -> Result<String, LexiconError> {
    std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })
}
