//! Global token frequency table.

use std::collections::HashMap;

use tracing::debug;

use crate::models::RankedToken;

/// Count every token occurrence across all sources and headlines.
///
/// Token identity is the exact, case-sensitive string. The result is sorted by
/// count, highest first; the sort is stable so tokens with equal counts keep
/// the order in which they were first seen. Singletons are kept: the only
/// minimum-count cutoff lives in the scorer.
pub fn rank_tokens(tokenized: &[Vec<Vec<String>>]) -> Vec<RankedToken> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<RankedToken> = Vec::new();

    for token in tokenized.iter().flatten().flatten() {
        match index.get(token.as_str()) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(token.as_str(), ranked.len());
                ranked.push(RankedToken {
                    token: token.clone(),
                    count: 1,
                });
            }
        }
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(distinct = ranked.len(), "Ranked tokens");
    ranked
}
