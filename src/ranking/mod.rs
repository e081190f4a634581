//! The headline ranking engine.
//!
//! Raw per-source headlines flow through four purely sequential stages:
//!
//! 1. [`tokenize`]: each title becomes an ordered list of normalized tokens
//! 2. [`rank`]: every token occurrence is counted into one global table
//! 3. [`score`]: each headline is ranked by the counts of its tokens
//! 4. [`select`]: both sorted sequences are cut to the requested size
//!
//! None of the stages touch the network or share state; [`rank_headlines`]
//! runs all four over data the orchestrator already fetched.

pub mod rank;
pub mod score;
pub mod select;
pub mod tokenize;

use tracing::{debug, info, instrument};

use crate::config::{TokenizerMode, TopCounts};
use crate::models::{RankedToken, SourceResponse, TokenConfig, TopHeadline};

pub use rank::rank_tokens;
pub use score::score_titles;
pub use select::select;
pub use tokenize::{tokenize_title, tokenize_titles};

/// Knobs for a single ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub mode: TokenizerMode,
    pub min_token_count: u64,
}

/// The selected top headlines and tokens. `None` means the list was not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    pub top_headlines: Option<Vec<TopHeadline>>,
    pub top_tokens: Option<Vec<RankedToken>>,
}

/// Run tokenize → rank → score → select over fetched responses.
#[instrument(level = "info", skip_all, fields(sources = responses.len()))]
pub fn rank_headlines(
    responses: &[SourceResponse],
    token_config: &TokenConfig,
    counts: TopCounts,
    options: RankOptions,
) -> Rankings {
    let tokenized = tokenize_titles(responses, token_config, options.mode);
    debug!(?tokenized, "tokenizedTitles");

    let ranked = rank_tokens(&tokenized);
    debug!(?ranked, "rankedTokens");

    let scored = score_titles(responses, &tokenized, &ranked, options.min_token_count);
    debug!(
        scored = ?scored
            .iter()
            .map(|s| (s.source, s.headline.title.as_str(), s.title_rank))
            .collect::<Vec<_>>(),
        "scoredTitles"
    );

    let top_tokens = counts.tokens.map(|n| select(ranked, n));
    let top_headlines = counts.headlines.map(|n| {
        select(scored, n)
            .iter()
            .map(|s| s.to_top_headline())
            .collect::<Vec<_>>()
    });

    info!(
        top_headlines = top_headlines.as_ref().map(Vec::len),
        top_tokens = top_tokens.as_ref().map(Vec::len),
        "Selected rankings"
    );
    Rankings {
        top_headlines,
        top_tokens,
    }
}
