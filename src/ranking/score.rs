//! Per-headline relevance scoring.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{RankedToken, ScoredHeadline, SourceResponse};

/// Score every headline against the current token table.
///
/// A headline's rank is the sum of the counts of its tokens, skipping tokens
/// whose count is below `min_token_count` (a value of 0 or 1 disables the
/// cutoff). `title_tokens` must have the shape produced by
/// [`super::tokenize::tokenize_titles`] for the same `responses`; a headline
/// with no token list scores 0.
///
/// The output is flattened across sources and sorted by rank, highest first,
/// with ties kept in encounter order.
pub fn score_titles<'a>(
    responses: &'a [SourceResponse],
    title_tokens: &'a [Vec<Vec<String>>],
    ranked: &[RankedToken],
    min_token_count: u64,
) -> Vec<ScoredHeadline<'a>> {
    let counts: HashMap<&str, u64> = ranked
        .iter()
        .map(|r| (r.token.as_str(), r.count))
        .collect();
    let floor = min_token_count.max(1);

    let mut scored = Vec::new();
    for (i, response) in responses.iter().enumerate() {
        let per_title = title_tokens.get(i);
        for (j, headline) in response.headlines.iter().enumerate() {
            let tokens: &[String] = per_title
                .and_then(|titles| titles.get(j))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let title_rank = tokens
                .iter()
                .filter_map(|token| counts.get(token.as_str()).copied())
                .filter(|&count| count >= floor)
                .sum();
            scored.push(ScoredHeadline {
                source: response.source,
                headline,
                title_tokens: tokens,
                title_rank,
            });
        }
    }

    scored.sort_by(|a, b| b.title_rank.cmp(&a.title_rank));
    debug!(headlines = scored.len(), min_token_count = floor, "Scored titles");
    scored
}
