//! The pipeline orchestrator.
//!
//! A run moves through `fetching → tokenizing → ranking → scoring → selecting`,
//! or stops after `fetching` when no ranking was requested. Runs are one-shot:
//! nothing is retried and nothing is resumed.
//!
//! # Fetch fan-out
//!
//! Every `(source, category)` fetch is an independent future. All of them are
//! polled together and joined with wait-for-all semantics, so one slow or
//! failing source never blocks or fails the others. Failed and empty sources
//! are logged and left out of the result.

use futures::future::join_all;
use itertools::Itertools;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::api::Summarizer;
use crate::config::{NewsConfig, TopCounts};
use crate::error::{NewsError, Result};
use crate::models::{Category, NewsResult, Source, SourceResponse, TokenConfig};
use crate::ranking::{RankOptions, rank_headlines};
use crate::scrapers::HeadlineFetcher;

/// Drives fetching and ranking for one configuration and fetcher.
#[derive(Debug)]
pub struct News<F> {
    config: NewsConfig,
    fetcher: F,
}

impl<F: HeadlineFetcher> News<F> {
    pub fn new(config: NewsConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    async fn fetch_one(&self, category: Category, source: Source) -> Result<SourceResponse> {
        let fetch = self.fetcher.fetch(category, source);
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| NewsError::Fetch {
                    outlet: source,
                    message: format!("timed out after {} ms", limit.as_millis()),
                })?,
            None => fetch.await,
        }
    }

    /// Fetch every source concurrently and keep the ones that produced headlines.
    ///
    /// Duplicate sources are fetched once. The output follows the requested
    /// source order. An all-failed fetch yields an empty list, not an error.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_headlines(&self, category: Category, sources: &[Source]) -> Vec<SourceResponse> {
        let t0 = Instant::now();
        let sources: Vec<Source> = sources.iter().copied().unique().collect();
        let outcomes = join_all(sources.iter().map(|&source| self.fetch_one(category, source))).await;

        let mut responses = Vec::with_capacity(sources.len());
        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Ok(response) if response.headlines.is_empty() => {
                    warn!(%source, "Source returned no headlines; excluding it");
                }
                Ok(response) => {
                    debug!(%source, count = response.headlines.len(), "Source fetched");
                    responses.push(response);
                }
                Err(e) => {
                    warn!(%source, error = %e, "Source fetch failed; excluding it");
                }
            }
        }

        info!(
            requested = sources.len(),
            succeeded = responses.len(),
            headlines = responses.iter().map(|r| r.headlines.len()).sum::<usize>(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched headlines"
        );
        responses
    }

    /// Fetch and, unless `top_counts` is absent or empty, rank headlines.
    ///
    /// Without any requested count the result carries only the raw
    /// responses; `topHeadlines` and `topTokens` are omitted.
    #[instrument(level = "info", skip(self, token_config))]
    pub async fn get_headlines(
        &self,
        category: Category,
        sources: &[Source],
        token_config: &TokenConfig,
        top_counts: Option<TopCounts>,
    ) -> Result<NewsResult> {
        if sources.is_empty() {
            return Err(NewsError::Config("no news sources requested".to_string()));
        }

        let source_responses = self.scrape_headlines(category, sources).await;

        let counts = match top_counts {
            Some(counts) if !counts.is_unset() => counts,
            _ => {
                info!("No ranking requested; returning raw source responses");
                return Ok(NewsResult {
                    source_responses,
                    top_headlines: None,
                    top_tokens: None,
                });
            }
        };

        let options = RankOptions {
            mode: self.config.tokenizer_mode,
            min_token_count: self.config.min_token_count,
        };
        let rankings = rank_headlines(&source_responses, token_config, counts, options);

        Ok(NewsResult {
            source_responses,
            top_headlines: rankings.top_headlines,
            top_tokens: rankings.top_tokens,
        })
    }

    /// Fetch headlines and condense all titles with `summarizer`.
    ///
    /// A summarizer failure is returned to the caller unchanged.
    #[instrument(level = "info", skip(self, summarizer))]
    pub async fn summarize_headlines<S: Summarizer>(
        &self,
        category: Category,
        sources: &[Source],
        summarizer: &S,
    ) -> Result<Vec<String>> {
        if sources.is_empty() {
            return Err(NewsError::Config("no news sources requested".to_string()));
        }

        let responses = self.scrape_headlines(category, sources).await;
        let titles: Vec<String> = responses
            .iter()
            .flat_map(|r| r.headlines.iter().map(|h| h.title.clone()))
            .collect();
        info!(titles = titles.len(), "Summarizing headlines");

        summarizer.summarize(&titles).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawHeadline;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct StubFetcher {
        pages: HashMap<Source, Vec<RawHeadline>>,
        slow: Vec<Source>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn with(mut self, source: Source, titles: &[&str]) -> Self {
            let headlines = titles
                .iter()
                .enumerate()
                .map(|(i, t)| RawHeadline::new(*t, format!("https://{source}.example/{i}")))
                .collect();
            self.pages.insert(source, headlines);
            self
        }
    }

    impl HeadlineFetcher for StubFetcher {
        async fn fetch(&self, category: Category, source: Source) -> Result<SourceResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.slow.contains(&source) {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            let headlines = self.pages.get(&source).cloned().ok_or(NewsError::Fetch {
                outlet: source,
                message: "connection refused".to_string(),
            })?;
            Ok(SourceResponse {
                source,
                category,
                headlines,
            })
        }
    }

    fn news(fetcher: StubFetcher) -> News<StubFetcher> {
        let config = NewsConfig {
            fetch_timeout: Some(Duration::from_millis(50)),
            min_token_count: 1,
            ..NewsConfig::default()
        };
        News::new(config, fetcher)
    }

    #[tokio::test]
    async fn test_failed_source_is_excluded_others_unaffected() {
        let fetcher = StubFetcher::default()
            .with(Source::Ap, &["AP reports fire again"])
            .with(Source::Cnn, &["CNN reports flood"]);
        let news = news(fetcher);

        let responses = news
            .scrape_headlines(Category::Politics, &[Source::Ap, Source::Fox, Source::Cnn])
            .await;
        let sources: Vec<Source> = responses.iter().map(|r| r.source).collect();
        assert_eq!(sources, [Source::Ap, Source::Cnn]);
        assert_eq!(responses[1].headlines[0].title, "CNN reports flood");
    }

    #[tokio::test]
    async fn test_all_failed_yields_empty_not_error() {
        let news = news(StubFetcher::default());
        let result = news
            .get_headlines(
                Category::Politics,
                &[Source::Fox, Source::Npr],
                &TokenConfig::default(),
                Some(TopCounts::defaults()),
            )
            .await
            .unwrap();
        assert!(result.source_responses.is_empty());
        assert_eq!(result.top_headlines, Some(vec![]));
        assert_eq!(result.top_tokens, Some(vec![]));
    }

    #[tokio::test]
    async fn test_empty_source_is_excluded() {
        let fetcher = StubFetcher::default()
            .with(Source::Npr, &[])
            .with(Source::Fox, &["Fox News reports fire"]);
        let responses = news(fetcher)
            .scrape_headlines(Category::Politics, &[Source::Npr, Source::Fox])
            .await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].source, Source::Fox);
    }

    #[tokio::test]
    async fn test_slow_source_times_out_without_blocking_others() {
        let fetcher = StubFetcher {
            slow: vec![Source::WashExam],
            ..StubFetcher::default()
        }
        .with(Source::WashExam, &["Never arrives"])
        .with(Source::Ap, &["Senate passes bill"]);

        let started = Instant::now();
        let responses = news(fetcher)
            .scrape_headlines(Category::Politics, &[Source::WashExam, Source::Ap])
            .await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].source, Source::Ap);
    }

    #[tokio::test]
    async fn test_duplicate_sources_fetched_once() {
        let fetcher = StubFetcher::default().with(Source::Cnn, &["CNN reports flood"]);
        let news = news(fetcher);
        let responses = news
            .scrape_headlines(Category::Politics, &[Source::Cnn, Source::Cnn])
            .await;
        assert_eq!(responses.len(), 1);
        assert_eq!(news.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_counts_skips_ranking() {
        let fetcher = StubFetcher::default().with(Source::Cnn, &["CNN reports flood"]);
        let news = news(fetcher);
        for counts in [None, Some(TopCounts::default())] {
            let result = news
                .get_headlines(Category::Politics, &[Source::Cnn], &TokenConfig::default(), counts)
                .await
                .unwrap();
            assert_eq!(result.source_responses.len(), 1);
            assert!(result.top_headlines.is_none());
            assert!(result.top_tokens.is_none());
        }
    }

    #[tokio::test]
    async fn test_no_sources_is_a_config_error() {
        let news = news(StubFetcher::default());
        let err = news
            .get_headlines(Category::Politics, &[], &TokenConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Config(_)));
        assert_eq!(news.fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
