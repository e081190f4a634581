//! Title tokenization.
//!
//! A title is split on single ASCII spaces, each word is stripped of a fixed
//! punctuation set, and the working string is then mined for configured
//! multi-word phrases and synonym variants before the remaining words are
//! filtered through the ignore list.
//!
//! # Ordering
//!
//! Multi-word extraction always runs before synonym extraction, and both run on
//! a working string that loses every occurrence of a matched phrase, so later
//! steps only ever see the text earlier steps left behind.

use tracing::{debug, warn};

use crate::config::TokenizerMode;
use crate::models::{SourceResponse, SynonymGroup, TokenConfig};

/// Characters removed from every word, wherever they appear.
const STRIPPED_CHARS: [char; 9] = ['\'', '’', '`', ':', ';', '"', ',', '.', '?'];

/// Possessive suffixes removed from the end of a word.
const POSSESSIVE_SUFFIXES: [&str; 2] = ["'s", "’s"];

/// Strip punctuation and the possessive suffix from a single word.
///
/// Trailing sentence punctuation is removed before the possessive check so
/// that `Trump's,` and `Trump's` both normalize to `Trump`.
pub fn normalize_word(word: &str, lowercase: bool) -> String {
    let without_marks: String = word
        .chars()
        .filter(|c| !matches!(c, ':' | ';' | '"' | ',' | '.' | '?'))
        .collect();

    let base = POSSESSIVE_SUFFIXES
        .iter()
        .find_map(|suffix| without_marks.strip_suffix(suffix))
        .unwrap_or(&without_marks);

    let cleaned: String = base.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
    if lowercase {
        cleaned.to_lowercase()
    } else {
        cleaned
    }
}

/// Normalize every word of a title and re-join the survivors with single spaces.
fn working_string(title: &str, lowercase: bool) -> String {
    title
        .split(' ')
        .map(|word| normalize_word(word, lowercase))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_multi_word(working: &mut String, phrases: &[String], tokens: &mut Vec<String>) {
    for phrase in phrases.iter().filter(|p| !p.is_empty()) {
        if working.contains(phrase.as_str()) {
            tokens.push(phrase.clone());
            *working = working.replace(phrase.as_str(), "");
        }
    }
}

fn extract_synonyms(working: &mut String, groups: &[SynonymGroup], tokens: &mut Vec<String>) {
    for group in groups {
        let mut pushed = false;
        for variant in group.variants.iter().filter(|v| !v.is_empty()) {
            if working.contains(variant.as_str()) {
                if !pushed {
                    tokens.push(group.canonical.clone());
                    pushed = true;
                }
                *working = working.replace(variant.as_str(), "");
            }
        }
    }
}

/// Tokenize one title.
///
/// In [`TokenizerMode::Phrase`] case is preserved whenever multi-word or
/// synonym tokens are configured (their matching is case-sensitive), and
/// words are lower-cased otherwise. [`TokenizerMode::Simple`] always
/// lower-cases and only applies the ignore list.
pub fn tokenize_title(title: &str, config: &TokenConfig, mode: TokenizerMode) -> Vec<String> {
    let phrase_matching = mode == TokenizerMode::Phrase && config.has_phrases();
    let mut working = working_string(title, !phrase_matching);
    let mut tokens = Vec::new();

    if phrase_matching {
        extract_multi_word(&mut working, &config.multi_word_tokens, &mut tokens);
        extract_synonyms(&mut working, &config.synonym_tokens, &mut tokens);
    }

    tokens.extend(
        working
            .split(' ')
            .filter(|word| !word.is_empty() && !config.ignore_tokens.contains(*word))
            .map(str::to_string),
    );
    tokens
}

/// Tokenize every headline of every response.
///
/// The result mirrors the input shape: one entry per response, one token list
/// per headline.
pub fn tokenize_titles(
    responses: &[SourceResponse],
    config: &TokenConfig,
    mode: TokenizerMode,
) -> Vec<Vec<Vec<String>>> {
    if mode == TokenizerMode::Simple && config.has_phrases() {
        warn!(
            multi_word = config.multi_word_tokens.len(),
            synonyms = config.synonym_tokens.len(),
            "Simple tokenizer selected; ignoring configured multi-word and synonym tokens"
        );
    }

    let tokenized: Vec<Vec<Vec<String>>> = responses
        .iter()
        .map(|response| {
            response
                .headlines
                .iter()
                .map(|headline| tokenize_title(&headline.title, config, mode))
                .collect()
        })
        .collect();

    debug!(
        sources = tokenized.len(),
        titles = tokenized.iter().map(Vec::len).sum::<usize>(),
        "Tokenized titles"
    );
    tokenized
}
