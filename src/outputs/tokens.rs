//! Token-configuration documents.
//!
//! Three JSON documents live in the data directory, one per feature:
//!
//! ```text
//! ignore-tokens.json      { "ignoreTokens": ["the", "a", ...] }
//! multi-word-tokens.json  { "multiWordTokens": ["New York", ...] }
//! synonym-tokens.json     { "synonymTokens": [{ "Trump": ["Donald Trump", ...] }, ...] }
//! ```
//!
//! A bare array is accepted in place of the wrapping object when reading.
//! A document that is missing, unreadable or malformed disables its feature
//! for the run; it never fails the run.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::models::{SynonymGroup, TokenConfig};
use crate::utils::ensure_writable_dir;

pub const IGNORE_TOKENS_KEY: &str = "ignoreTokens";
pub const MULTI_WORD_TOKENS_KEY: &str = "multiWordTokens";
pub const SYNONYM_TOKENS_KEY: &str = "synonymTokens";

/// Outcome of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Written(PathBuf),
    /// Nothing to store; carries the message shown to the caller.
    Skipped(String),
}

/// Pull the list stored under `key`, or the document itself if it is a bare array.
fn extract_list<T: DeserializeOwned>(raw: &str, key: &str) -> Result<T> {
    let value: Value = serde_json::from_str(raw)?;
    let list = match value {
        Value::Object(mut obj) => obj
            .remove(key)
            .ok_or_else(|| NewsError::Parse(format!("document has no '{key}' field")))?,
        list @ Value::Array(_) => list,
        _ => {
            return Err(NewsError::Parse(format!(
                "expected an object with '{key}' or an array"
            )));
        }
    };
    Ok(serde_json::from_value(list)?)
}

pub fn parse_ignore_tokens(raw: &str) -> Result<HashSet<String>> {
    let tokens: Vec<String> = extract_list(raw, IGNORE_TOKENS_KEY)?;
    Ok(tokens.into_iter().collect())
}

pub fn parse_multi_word_tokens(raw: &str) -> Result<Vec<String>> {
    extract_list(raw, MULTI_WORD_TOKENS_KEY)
}

/// Parse synonym groups, keeping the document order of groups and variants.
pub fn parse_synonym_tokens(raw: &str) -> Result<Vec<SynonymGroup>> {
    let entries: Vec<Map<String, Value>> = extract_list(raw, SYNONYM_TOKENS_KEY)?;
    let mut groups = Vec::new();
    for entry in entries {
        for (canonical, variants) in entry {
            let variants: Vec<String> = serde_json::from_value(variants)?;
            groups.push(SynonymGroup {
                canonical,
                variants,
            });
        }
    }
    Ok(groups)
}

/// The stored shape of a synonym document.
pub fn synonym_document(groups: &[SynonymGroup]) -> Value {
    let entries: Vec<Value> = groups
        .iter()
        .map(|group| {
            let mut entry = Map::new();
            entry.insert(group.canonical.clone(), json!(group.variants));
            Value::Object(entry)
        })
        .collect();
    json!({ SYNONYM_TOKENS_KEY: entries })
}

/// Reads and writes the token-configuration documents.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
    ignore_file: String,
    multi_word_file: String,
    synonym_file: String,
}

impl TokenStore {
    pub fn new(config: &NewsConfig) -> Self {
        Self {
            dir: config.data_dir.clone(),
            ignore_file: config.ignore_tokens_filename.clone(),
            multi_word_file: config.multi_word_tokens_filename.clone(),
            synonym_file: config.synonym_tokens_filename.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every document; absent or malformed ones come back empty.
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display()))]
    pub async fn load(&self) -> TokenConfig {
        let config = TokenConfig {
            ignore_tokens: self
                .load_document(&self.ignore_file, parse_ignore_tokens)
                .await
                .unwrap_or_default(),
            multi_word_tokens: self
                .load_document(&self.multi_word_file, parse_multi_word_tokens)
                .await
                .unwrap_or_default(),
            synonym_tokens: self
                .load_document(&self.synonym_file, parse_synonym_tokens)
                .await
                .unwrap_or_default(),
        };
        info!(
            ignore = config.ignore_tokens.len(),
            multi_word = config.multi_word_tokens.len(),
            synonyms = config.synonym_tokens.len(),
            "Loaded token configuration"
        );
        config
    }

    async fn load_document<T>(&self, filename: &str, parse: fn(&str) -> Result<T>) -> Option<T> {
        let path = self.dir.join(filename);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Token document not present; feature disabled");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read token document; feature disabled");
                return None;
            }
        };
        match parse(&raw) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed token document; feature disabled");
                None
            }
        }
    }

    async fn write_document(&self, filename: &str, document: &Value) -> Result<PathBuf> {
        ensure_writable_dir(&self.dir).await?;
        let path = self.dir.join(filename);
        fs::write(&path, serde_json::to_vec(document)?).await?;
        info!(path = %path.display(), "Wrote token document");
        Ok(path)
    }

    #[instrument(level = "info", skip_all, fields(count = tokens.len()))]
    pub async fn save_ignore_tokens(&self, tokens: &[String]) -> Result<Saved> {
        if tokens.is_empty() {
            return Ok(skipped(IGNORE_TOKENS_KEY));
        }
        let document = json!({ IGNORE_TOKENS_KEY: tokens });
        let path = self.write_document(&self.ignore_file, &document).await?;
        Ok(Saved::Written(path))
    }

    #[instrument(level = "info", skip_all, fields(count = phrases.len()))]
    pub async fn save_multi_word_tokens(&self, phrases: &[String]) -> Result<Saved> {
        if phrases.is_empty() {
            return Ok(skipped(MULTI_WORD_TOKENS_KEY));
        }
        let document = json!({ MULTI_WORD_TOKENS_KEY: phrases });
        let path = self.write_document(&self.multi_word_file, &document).await?;
        Ok(Saved::Written(path))
    }

    #[instrument(level = "info", skip_all, fields(count = groups.len()))]
    pub async fn save_synonym_tokens(&self, groups: &[SynonymGroup]) -> Result<Saved> {
        if groups.is_empty() {
            return Ok(skipped(SYNONYM_TOKENS_KEY));
        }
        let path = self
            .write_document(&self.synonym_file, &synonym_document(groups))
            .await?;
        Ok(Saved::Written(path))
    }
}

fn skipped(key: &str) -> Saved {
    let message = format!("{key} were not passed in");
    info!("{message}");
    Saved::Skipped(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> TokenStore {
        let config = NewsConfig {
            data_dir: dir.to_path_buf(),
            ..NewsConfig::default()
        };
        TokenStore::new(&config)
    }

    #[test]
    fn test_parse_ignore_tokens_wrapped_and_bare() {
        let wrapped = parse_ignore_tokens(r#"{"ignoreTokens": ["the", "a", "the"]}"#).unwrap();
        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.contains("the"));

        let bare = parse_ignore_tokens(r#"["of", "to"]"#).unwrap();
        assert!(bare.contains("of") && bare.contains("to"));
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        assert!(parse_multi_word_tokens(r#"{"other": []}"#).is_err());
        assert!(parse_multi_word_tokens(r#""New York""#).is_err());
        assert!(parse_multi_word_tokens(r#"{"multiWordTokens": [1, 2]}"#).is_err());
        assert!(parse_ignore_tokens("{not json").is_err());
    }

    #[test]
    fn test_parse_synonyms_keeps_document_order() {
        let raw = r#"{"synonymTokens": [
            {"Trump": ["Donald Trump", "President Trump"]},
            {"GOP": ["Republicans", "Republican Party"], "Dems": ["Democrats"]}
        ]}"#;
        let groups = parse_synonym_tokens(raw).unwrap();
        let canonicals: Vec<&str> = groups.iter().map(|g| g.canonical.as_str()).collect();
        assert_eq!(canonicals, ["Trump", "GOP", "Dems"]);
        assert_eq!(groups[0].variants, ["Donald Trump", "President Trump"]);
    }

    #[test]
    fn test_parse_synonyms_rejects_non_list_variants() {
        assert!(parse_synonym_tokens(r#"{"synonymTokens": [{"Trump": "Donald"}]}"#).is_err());
    }

    #[tokio::test]
    async fn test_round_trip_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        store
            .save_ignore_tokens(&["the".to_string(), "a".to_string()])
            .await
            .unwrap();
        store
            .save_multi_word_tokens(&["New York".to_string(), "White House".to_string()])
            .await
            .unwrap();
        let groups = vec![SynonymGroup {
            canonical: "Trump".to_string(),
            variants: vec!["Donald Trump".to_string()],
        }];
        store.save_synonym_tokens(&groups).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.ignore_tokens.len(), 2);
        assert_eq!(loaded.multi_word_tokens, ["New York", "White House"]);
        assert_eq!(loaded.synonym_tokens, groups);

        let raw = std::fs::read_to_string(tmp.path().join("ignore-tokens.json")).unwrap();
        assert!(raw.starts_with(r#"{"ignoreTokens":"#));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_documents_disable_features() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("multi-word-tokens.json"), "{ broken").unwrap();
        std::fs::write(
            tmp.path().join("ignore-tokens.json"),
            r#"{"ignoreTokens": ["the"]}"#,
        )
        .unwrap();

        let loaded = store_in(tmp.path()).load().await;
        assert!(loaded.ignore_tokens.contains("the"));
        assert!(loaded.multi_word_tokens.is_empty());
        assert!(loaded.synonym_tokens.is_empty());
    }

    #[tokio::test]
    async fn test_empty_lists_are_not_written() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        let saved = store.save_multi_word_tokens(&[]).await.unwrap();
        assert_eq!(
            saved,
            Saved::Skipped("multiWordTokens were not passed in".to_string())
        );
        assert!(!tmp.path().join("multi-word-tokens.json").exists());
    }
}
