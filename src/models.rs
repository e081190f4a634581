//! Data models for fetched headlines and their ranked representations.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`SourceResponse`] / [`RawHeadline`]: what a source fetch produced, never mutated
//! - [`ScoredHeadline`]: a raw headline layered with its tokens and rank
//! - [`RankedToken`]: one entry of the global token frequency table
//! - [`TokenConfig`]: ignore, multi-word and synonym tokens for one run
//! - [`NewsResult`]: the public result, serialized with camelCase keys

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A news outlet the fetcher knows how to read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Source {
    Ap,
    Cnn,
    Fox,
    Npr,
    WashExam,
}

impl Source {
    /// Every known source, in the order used when the caller names none.
    pub const ALL: [Source; 5] = [
        Source::Ap,
        Source::Cnn,
        Source::Fox,
        Source::Npr,
        Source::WashExam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Ap => "ap",
            Source::Cnn => "cnn",
            Source::Fox => "fox",
            Source::Npr => "npr",
            Source::WashExam => "washexam",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A news category (section) requested from every source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Category {
    Politics,
    World,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::World => "world",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A headline exactly as a source published it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawHeadline {
    pub title: String,
    pub url: String,
}

impl RawHeadline {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// All headlines one source returned for one category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceResponse {
    pub source: Source,
    pub category: Category,
    pub headlines: Vec<RawHeadline>,
}

/// A raw headline layered with the fields derived by the ranking stages.
///
/// The raw record and its tokens are borrowed from the pipeline run that
/// produced them; only `title_rank` is computed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredHeadline<'a> {
    pub source: Source,
    pub headline: &'a RawHeadline,
    pub title_tokens: &'a [String],
    pub title_rank: u64,
}

impl ScoredHeadline<'_> {
    /// Project onto the public `{ source, title, url }` view.
    pub fn to_top_headline(&self) -> TopHeadline {
        TopHeadline {
            source: self.source,
            title: self.headline.title.clone(),
            url: self.headline.url.clone(),
        }
    }
}

/// One distinct token and how often it occurred across every fetched title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RankedToken {
    pub token: String,
    pub count: u64,
}

/// A canonical token and the variant spellings that collapse into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymGroup {
    pub canonical: String,
    pub variants: Vec<String>,
}

/// Token configuration for a single run. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenConfig {
    pub ignore_tokens: HashSet<String>,
    pub multi_word_tokens: Vec<String>,
    pub synonym_tokens: Vec<SynonymGroup>,
}

impl TokenConfig {
    /// True when multi-word or synonym extraction is configured.
    pub fn has_phrases(&self) -> bool {
        !self.multi_word_tokens.is_empty() || !self.synonym_tokens.is_empty()
    }

    pub fn with_ignore_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_multi_word_tokens<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_word_tokens = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_synonym_group<I, S>(mut self, canonical: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonym_tokens.push(SynonymGroup {
            canonical: canonical.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// The public view of a top-ranked headline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopHeadline {
    pub source: Source,
    pub title: String,
    pub url: String,
}

/// The externally visible output of one pipeline run.
///
/// `top_headlines` and `top_tokens` are omitted from the JSON entirely when no
/// ranking was requested for them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResult {
    pub source_responses: Vec<SourceResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_headlines: Option<Vec<TopHeadline>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_tokens: Option<Vec<RankedToken>>,
}
