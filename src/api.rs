//! LLM-backed headline summarization.
//!
//! The summarizer condenses a flat list of titles into at most
//! [`MAX_SUMMARY_HEADLINES`] lines through an OpenAI-compatible API.
//!
//! # Architecture
//!
//! - [`Summarizer`]: the boundary the orchestrator depends on
//! - [`LlmSummarizer`]: implementation on top of `awful_aj::api::ask`
//!
//! The call is made once. Replies are not deterministic and a failure is
//! returned to the caller as-is; there is no fallback summary and no retry.

use awful_aj::api::ask;
use awful_aj::{config::AwfulJadeConfig, config_dir, template::ChatTemplate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::utils::truncate_for_log;

pub const MAX_SUMMARY_HEADLINES: usize = 5;

static RE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s*").expect("static bullet regex"));

/// Condense a list of headlines into a short list.
pub trait Summarizer {
    async fn summarize(&self, titles: &[String]) -> Result<Vec<String>>;
}

/// Build the prompt sent to the model.
pub fn build_prompt(titles: &[String]) -> String {
    let mut prompt = String::from("Given the following news headlines:\n\n");
    prompt.push_str(&titles.join("\n"));
    prompt.push_str(&format!(
        "\n\nProduce a summarized list of headlines, no more than {MAX_SUMMARY_HEADLINES}, \
         that best represents all of the headlines.\n\n"
    ));
    prompt
}

/// Split a model reply into headlines.
///
/// List bullets and numbering are stripped, blank lines dropped, and the
/// result capped at [`MAX_SUMMARY_HEADLINES`].
pub fn parse_summary(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| RE_BULLET.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_SUMMARY_HEADLINES)
        .collect()
}

/// [`Summarizer`] backed by an `awful_aj` configuration and chat template.
pub struct LlmSummarizer {
    config: AwfulJadeConfig,
    template: ChatTemplate,
}

impl std::fmt::Debug for LlmSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSummarizer").finish_non_exhaustive()
    }
}

impl LlmSummarizer {
    /// Load the `awful_aj` config and template, then apply the configured API key.
    ///
    /// `config_path` defaults to `config.yaml` in the `awful_aj` config directory.
    #[instrument(level = "info", skip(news_config))]
    pub async fn load(
        news_config: &NewsConfig,
        config_path: Option<PathBuf>,
        template_name: &str,
    ) -> Result<Self> {
        let api_key = news_config.require_api_key()?;

        let path = match config_path {
            Some(path) => path,
            None => config_dir()
                .map_err(|e| NewsError::Config(format!("cannot locate config directory: {e}")))?
                .join("config.yaml"),
        };
        let path_str = path
            .to_str()
            .ok_or_else(|| NewsError::Config(format!("not a valid config filename: {path:?}")))?;

        let mut config = awful_aj::config::load_config(path_str)
            .map_err(|e| NewsError::Config(format!("cannot load {path_str}: {e}")))?;
        config.api_key = api_key.to_string();
        info!(config_path = path_str, "Loaded summarizer configuration");

        let template = awful_aj::template::load_template(template_name)
            .await
            .map_err(|e| NewsError::Config(format!("cannot load template {template_name}: {e}")))?;
        info!(template_name, "Loaded summarizer template");

        Ok(Self { config, template })
    }
}

impl Summarizer for LlmSummarizer {
    #[instrument(level = "info", skip_all, fields(titles = titles.len()))]
    async fn summarize(&self, titles: &[String]) -> Result<Vec<String>> {
        let t0 = Instant::now();
        let prompt = build_prompt(titles);
        let reply = ask(&self.config, prompt, &self.template, None, None)
            .await
            .map_err(|e| {
                warn!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "API call failed");
                NewsError::Summarize(e.to_string())
            })?;

        let summary = parse_summary(&reply);
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            lines = summary.len(),
            reply = %truncate_for_log(&reply, 300),
            "Summarized headlines"
        );
        Ok(summary)
    }
}
