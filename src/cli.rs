//! Command-line interface definitions.
//!
//! Every option can be given as a flag or through the environment variable
//! named next to it. [`Cli::news_config`] turns the parsed arguments into the
//! explicit [`NewsConfig`] the pipeline runs with.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    DEFAULT_HEADLINES_FILENAME, DEFAULT_IGNORE_TOKENS_FILENAME, DEFAULT_MULTI_WORD_TOKENS_FILENAME,
    DEFAULT_SYNONYM_TOKENS_FILENAME, NewsConfig, TokenizerMode, TopCounts, parse_top_count,
};
use crate::error::{NewsError, Result};
use crate::models::{Category, Source};

/// Command-line arguments for the headline ranker.
///
/// # Examples
///
/// ```sh
/// # Rank today's politics headlines from every source
/// headline_ranker headlines -c politics
///
/// # Only AP and NPR, ten headlines, no token list
/// headline_ranker headlines -c politics -s ap -s npr --top-headlines 10 --top-tokens 0
///
/// # Store the ignore list used by later runs
/// headline_ranker post-ignore-tokens the a an of to
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Log every intermediate pipeline stage
    #[arg(short, long, global = true, env = "NEWS_VERBOSE")]
    pub verbose: bool,

    /// Directory holding token documents and results
    #[arg(long, global = true, env = "NEWS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    #[arg(long, global = true, env = "NEWS_IGNORE_TOKENS_FILENAME", default_value = DEFAULT_IGNORE_TOKENS_FILENAME)]
    pub ignore_tokens_filename: String,

    #[arg(long, global = true, env = "NEWS_MULTI_WORD_TOKENS_FILENAME", default_value = DEFAULT_MULTI_WORD_TOKENS_FILENAME)]
    pub multi_word_tokens_filename: String,

    #[arg(long, global = true, env = "NEWS_SYNONYM_TOKENS_FILENAME", default_value = DEFAULT_SYNONYM_TOKENS_FILENAME)]
    pub synonym_tokens_filename: String,

    #[arg(long, global = true, env = "NEWS_HEADLINES_FILENAME", default_value = DEFAULT_HEADLINES_FILENAME)]
    pub headlines_filename: String,

    /// Default number of top headlines
    #[arg(long, global = true, env = "NEWS_DEFAULT_NUM_TOP_HEADLINES", default_value = "20", allow_hyphen_values = true)]
    pub default_top_headlines: String,

    /// Default number of top tokens
    #[arg(long, global = true, env = "NEWS_DEFAULT_NUM_TOP_TOKENS", default_value = "20", allow_hyphen_values = true)]
    pub default_top_tokens: String,

    /// Tokens seen fewer times than this add nothing to a headline's rank (1 disables)
    #[arg(long, global = true, env = "NEWS_MIN_TOKEN_COUNT", default_value_t = 2)]
    pub min_token_count: u64,

    /// Per-source fetch deadline in seconds (0 disables)
    #[arg(long, global = true, env = "NEWS_FETCH_TIMEOUT_SECS", default_value_t = 20)]
    pub fetch_timeout_secs: u64,

    /// API key for the summarization endpoint
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and rank headlines, print the result
    Headlines(RankArgs),
    /// Fetch and rank headlines, store and print the result
    PostHeadlines(RankArgs),
    /// Store the ignore-token list
    PostIgnoreTokens {
        tokens: Vec<String>,
    },
    /// Store the multi-word token list
    PostMultiWordTokens {
        phrases: Vec<String>,
    },
    /// Store synonym groups read from a JSON document
    PostSynonymTokens {
        /// `{"synonymTokens": [{"canonical": ["variant", ...]}, ...]}` or the bare array
        file: PathBuf,
    },
    /// Fetch headlines and condense them with the LLM summarizer
    Summarize(SummarizeArgs),
}

/// Which category and sources to fetch.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(short, long, value_enum, default_value = "politics")]
    pub category: Category,

    /// Sources to fetch (repeatable); all sources when omitted
    #[arg(short, long = "source", value_enum)]
    pub sources: Vec<Source>,
}

impl FetchArgs {
    pub fn sources(&self) -> Vec<Source> {
        if self.sources.is_empty() {
            Source::ALL.to_vec()
        } else {
            self.sources.clone()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Number of top headlines (defaults to --default-top-headlines)
    #[arg(long, allow_hyphen_values = true)]
    pub top_headlines: Option<String>,

    /// Number of top tokens (defaults to --default-top-tokens)
    #[arg(long, allow_hyphen_values = true)]
    pub top_tokens: Option<String>,

    /// Skip ranking and return only the raw source responses
    #[arg(long)]
    pub raw: bool,

    /// Lower-case every word and apply only the ignore list
    #[arg(long)]
    pub simple: bool,
}

impl RankArgs {
    /// Resolve the requested counts; bad values are configuration errors.
    pub fn top_counts(&self, config: &NewsConfig) -> Result<TopCounts> {
        let headlines = self
            .top_headlines
            .as_deref()
            .map(|raw| parse_top_count("top headlines count", raw))
            .transpose()?;
        let tokens = self
            .top_tokens
            .as_deref()
            .map(|raw| parse_top_count("top tokens count", raw))
            .transpose()?;
        Ok(config.top_counts(headlines, tokens, self.raw))
    }
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Path to the summarizer's config.yaml
    #[arg(long)]
    pub llm_config: Option<PathBuf>,

    /// Name of the summarizer chat template
    #[arg(long, default_value = "news_summarizer")]
    pub template: String,
}

impl Cli {
    /// Build the run configuration, validating the numeric options.
    pub fn news_config(&self) -> Result<NewsConfig> {
        let tokenizer_mode = match &self.command {
            Command::Headlines(args) | Command::PostHeadlines(args) if args.simple => {
                TokenizerMode::Simple
            }
            _ => TokenizerMode::Phrase,
        };
        if self.data_dir.as_os_str().is_empty() {
            return Err(NewsError::Config("data directory must not be empty".to_string()));
        }

        Ok(NewsConfig {
            verbose: self.verbose,
            api_key: self.api_key.clone(),
            default_top_headlines: parse_top_count("default top headlines count", &self.default_top_headlines)?,
            default_top_tokens: parse_top_count("default top tokens count", &self.default_top_tokens)?,
            min_token_count: self.min_token_count,
            tokenizer_mode,
            fetch_timeout: (self.fetch_timeout_secs > 0)
                .then(|| Duration::from_secs(self.fetch_timeout_secs)),
            data_dir: self.data_dir.clone(),
            ignore_tokens_filename: self.ignore_tokens_filename.clone(),
            multi_word_tokens_filename: self.multi_word_tokens_filename.clone(),
            synonym_tokens_filename: self.synonym_tokens_filename.clone(),
            headlines_filename: self.headlines_filename.clone(),
        })
    }
}
