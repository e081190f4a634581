use headline_ranker::api::{MAX_SUMMARY_HEADLINES, Summarizer};
use headline_ranker::config::{NewsConfig, TopCounts};
use headline_ranker::models::{Category, RawHeadline, Source, SourceResponse};
use headline_ranker::outputs::tokens::TokenStore;
use headline_ranker::scrapers::HeadlineFetcher;
use headline_ranker::{News, NewsError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

#[derive(Default)]
struct CannedFetcher {
    pages: HashMap<Source, Vec<RawHeadline>>,
}

impl CannedFetcher {
    fn with(mut self, source: Source, titles: &[&str]) -> Self {
        let headlines = titles
            .iter()
            .enumerate()
            .map(|(i, t)| RawHeadline::new(*t, format!("https://{source}.example/story/{i}")))
            .collect();
        self.pages.insert(source, headlines);
        self
    }
}

impl HeadlineFetcher for CannedFetcher {
    async fn fetch(&self, category: Category, source: Source) -> Result<SourceResponse> {
        let headlines = self.pages.get(&source).cloned().ok_or(NewsError::Fetch {
            outlet: source,
            message: "503 Service Unavailable".to_string(),
        })?;
        Ok(SourceResponse {
            source,
            category,
            headlines,
        })
    }
}

struct RecordingSummarizer {
    seen: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSummarizer {
    fn new(fail: bool) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            fail,
        }
    }
}

impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, titles: &[String]) -> Result<Vec<String>> {
        self.seen.lock().unwrap().extend_from_slice(titles);
        if self.fail {
            return Err(NewsError::Summarize("model endpoint returned 500".to_string()));
        }
        Ok(titles.iter().take(MAX_SUMMARY_HEADLINES).cloned().collect())
    }
}

fn config_in(dir: &Path) -> NewsConfig {
    NewsConfig {
        data_dir: dir.to_path_buf(),
        ..NewsConfig::default()
    }
}

fn fire_and_flood() -> CannedFetcher {
    CannedFetcher::default()
        .with(Source::Fox, &["Fox News reports fire"])
        .with(Source::Cnn, &["CNN reports flood"])
        .with(Source::Ap, &["AP reports fire again"])
}

#[tokio::test]
async fn ranks_with_stored_ignore_list() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let store = TokenStore::new(&config);
    store
        .save_ignore_tokens(&["reports".to_string(), "again".to_string()])
        .await
        .unwrap();

    let token_config = store.load().await;
    let news = News::new(config, fire_and_flood());
    let result = news
        .get_headlines(
            Category::Politics,
            &[Source::Fox, Source::Cnn, Source::Ap, Source::Npr],
            &token_config,
            Some(TopCounts::new(Some(3), Some(2))),
        )
        .await
        .unwrap();

    // NPR has no canned page, so its fetch fails and it drops out.
    assert_eq!(result.source_responses.len(), 3);

    let tokens = result.top_tokens.unwrap();
    assert_eq!(tokens[0].token, "fire");
    assert_eq!(tokens[0].count, 2);
    assert_eq!(tokens[1].token, "fox");
    assert_eq!(tokens[1].count, 1);

    let titles: Vec<String> = result
        .top_headlines
        .unwrap()
        .into_iter()
        .map(|h| h.title)
        .collect();
    assert_eq!(
        titles,
        ["Fox News reports fire", "AP reports fire again", "CNN reports flood"]
    );
}

#[tokio::test]
async fn stored_phrases_survive_as_single_tokens() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let store = TokenStore::new(&config);
    store
        .save_multi_word_tokens(&["New York".to_string()])
        .await
        .unwrap();

    let fetcher = CannedFetcher::default()
        .with(Source::Npr, &["New York City votes"])
        .with(Source::Ap, &["New York braces for storm"]);
    let news = News::new(config, fetcher);
    let result = news
        .get_headlines(
            Category::Politics,
            &[Source::Npr, Source::Ap],
            &store.load().await,
            Some(TopCounts::new(None, Some(20))),
        )
        .await
        .unwrap();

    assert!(result.top_headlines.is_none());
    let tokens = result.top_tokens.unwrap();
    assert_eq!(tokens[0].token, "New York");
    assert_eq!(tokens[0].count, 2);
    assert!(!tokens.iter().any(|t| t.token == "New" || t.token == "York"));
}

#[tokio::test]
async fn result_json_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let news = News::new(config_in(tmp.path()), fire_and_flood());
    let token_config = TokenStore::new(news.config()).load().await;

    let raw = news
        .get_headlines(Category::World, &[Source::Cnn], &token_config, None)
        .await
        .unwrap();
    let value = serde_json::to_value(&raw).unwrap();
    assert!(value.get("sourceResponses").is_some());
    assert!(value.get("topHeadlines").is_none());
    assert!(value.get("topTokens").is_none());

    let ranked = news
        .get_headlines(
            Category::World,
            &[Source::Cnn],
            &token_config,
            Some(TopCounts::defaults()),
        )
        .await
        .unwrap();
    let value = serde_json::to_value(&ranked).unwrap();
    let top = &value["topHeadlines"][0];
    let keys: Vec<&str> = top.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["source", "title", "url"]);
    assert_eq!(top["source"], "cnn");
    assert_eq!(value["sourceResponses"][0]["category"], "world");
}

#[tokio::test]
async fn summarize_passes_every_title() {
    let tmp = tempfile::tempdir().unwrap();
    let news = News::new(config_in(tmp.path()), fire_and_flood());
    let summarizer = RecordingSummarizer::new(false);

    let summary = news
        .summarize_headlines(Category::Politics, &Source::ALL, &summarizer)
        .await
        .unwrap();

    assert_eq!(summary.len(), 3);
    assert_eq!(summarizer.seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn summarizer_failure_reaches_the_caller() {
    let tmp = tempfile::tempdir().unwrap();
    let news = News::new(config_in(tmp.path()), fire_and_flood());
    let summarizer = RecordingSummarizer::new(true);

    let err = news
        .summarize_headlines(Category::Politics, &[Source::Fox], &summarizer)
        .await
        .unwrap_err();

    assert!(matches!(err, NewsError::Summarize(_)));
    assert_eq!(*summarizer.seen.lock().unwrap(), ["Fox News reports fire"]);
}
