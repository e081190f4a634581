//! Explicit run configuration.
//!
//! Everything the pipeline needs to know is carried in a [`NewsConfig`] value
//! handed to [`crate::news::News::new`]. Environment variables are only read by
//! the CLI layer while building this struct.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{NewsError, Result};

pub const DEFAULT_TOP_HEADLINES: usize = 20;
pub const DEFAULT_TOP_TOKENS: usize = 20;
/// Tokens seen fewer times than this add nothing to a title's rank.
pub const DEFAULT_MIN_TOKEN_COUNT: u64 = 2;

pub const DEFAULT_IGNORE_TOKENS_FILENAME: &str = "ignore-tokens.json";
pub const DEFAULT_MULTI_WORD_TOKENS_FILENAME: &str = "multi-word-tokens.json";
pub const DEFAULT_SYNONYM_TOKENS_FILENAME: &str = "synonym-tokens.json";
pub const DEFAULT_HEADLINES_FILENAME: &str = "headlines.json";

/// Which tokenizer a run uses. Never mixed within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenizerMode {
    /// Case-preserving multi-word and synonym extraction, then the ignore list.
    #[default]
    Phrase,
    /// Lower-case every word and apply only the ignore list.
    Simple,
}

/// How many headlines and tokens to return. `None` omits that list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopCounts {
    pub headlines: Option<usize>,
    pub tokens: Option<usize>,
}

impl TopCounts {
    pub fn new(headlines: Option<usize>, tokens: Option<usize>) -> Self {
        Self { headlines, tokens }
    }

    /// Both lists at the default size.
    pub fn defaults() -> Self {
        Self::new(Some(DEFAULT_TOP_HEADLINES), Some(DEFAULT_TOP_TOKENS))
    }

    /// True when neither list was requested, i.e. the run skips ranking.
    pub fn is_unset(&self) -> bool {
        self.headlines.is_none() && self.tokens.is_none()
    }
}

/// Parse a caller-supplied top-N count.
///
/// Negative and non-numeric values are configuration errors.
pub fn parse_top_count(name: &str, raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(NewsError::Config(format!(
            "{name} must not be negative, got {n}"
        ))),
        Ok(n) => usize::try_from(n)
            .map_err(|_| NewsError::Config(format!("{name} is out of range: {n}"))),
        Err(_) => Err(NewsError::Config(format!(
            "{name} must be a non-negative integer, got '{trimmed}'"
        ))),
    }
}

/// Configuration for one [`crate::news::News`] instance.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Log every intermediate stage at debug level.
    pub verbose: bool,
    /// Key for the summarization endpoint; required only by the summarize mode.
    pub api_key: Option<String>,
    pub default_top_headlines: usize,
    pub default_top_tokens: usize,
    pub min_token_count: u64,
    pub tokenizer_mode: TokenizerMode,
    /// Deadline applied to every individual source fetch.
    pub fetch_timeout: Option<Duration>,
    pub data_dir: PathBuf,
    pub ignore_tokens_filename: String,
    pub multi_word_tokens_filename: String,
    pub synonym_tokens_filename: String,
    pub headlines_filename: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            api_key: None,
            default_top_headlines: DEFAULT_TOP_HEADLINES,
            default_top_tokens: DEFAULT_TOP_TOKENS,
            min_token_count: DEFAULT_MIN_TOKEN_COUNT,
            tokenizer_mode: TokenizerMode::Phrase,
            fetch_timeout: Some(Duration::from_secs(20)),
            data_dir: PathBuf::from("./data"),
            ignore_tokens_filename: DEFAULT_IGNORE_TOKENS_FILENAME.to_string(),
            multi_word_tokens_filename: DEFAULT_MULTI_WORD_TOKENS_FILENAME.to_string(),
            synonym_tokens_filename: DEFAULT_SYNONYM_TOKENS_FILENAME.to_string(),
            headlines_filename: DEFAULT_HEADLINES_FILENAME.to_string(),
        }
    }
}

impl NewsConfig {
    /// The configured API key, or a configuration error naming what needs it.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(NewsError::Config(
                "an API key (OPENAI_API_KEY) is required for summarization".to_string(),
            )),
        }
    }

    /// Resolve the requested counts against the configured defaults.
    ///
    /// `raw` skips ranking entirely; unspecified counts fall back to defaults.
    pub fn top_counts(&self, headlines: Option<usize>, tokens: Option<usize>, raw: bool) -> TopCounts {
        if raw {
            return TopCounts::default();
        }
        TopCounts::new(
            Some(headlines.unwrap_or(self.default_top_headlines)),
            Some(tokens.unwrap_or(self.default_top_tokens)),
        )
    }
}
