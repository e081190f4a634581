//! Headline fetchers for the supported news sources.
//!
//! Each source publishes a section page per category, either as HTML (read
//! with CSS selectors) or as an RSS feed. [`sites`] holds that table and
//! [`parse`] turns a fetched body into `(title, url)` pairs.
//!
//! # Supported Sources
//!
//! | Source | Politics | World |
//! |--------|----------|-------|
//! | AP News | HTML section page | HTML section page |
//! | CNN | CNN Lite (HTML) | RSS |
//! | Fox News | RSS | RSS |
//! | NPR | RSS | RSS |
//! | Washington Examiner | HTML section page | not published |
//!
//! A fetch covers exactly one `(source, category)` pair and fails on its
//! own; the orchestrator decides what a failure means for the run.

pub mod parse;
pub mod sites;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::error::{NewsError, Result};
use crate::models::{Category, Source, SourceResponse};
use parse::{parse_html_headlines, parse_rss_headlines};
use sites::{PageFormat, site_for};

const USER_AGENT: &str = concat!("headline_ranker/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce the headlines of one source for one category.
///
/// Implementations must be safe to call concurrently for different sources.
pub trait HeadlineFetcher {
    async fn fetch(&self, category: Category, source: Source) -> Result<SourceResponse>;
}

/// Fetches section pages over HTTP and parses them per [`sites::site_for`].
#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl HeadlineFetcher for WebScraper {
    #[instrument(level = "info", skip(self), fields(%category, %source))]
    async fn fetch(&self, category: Category, source: Source) -> Result<SourceResponse> {
        let site = site_for(source, category).ok_or_else(|| NewsError::Fetch {
            outlet: source,
            message: format!("{source} does not publish a {category} section"),
        })?;

        let response = self.client.get(site.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Fetch {
                outlet: source,
                message: format!("{} returned status {}", site.url, status),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), url = site.url, "Fetched section page");

        let headlines = match site.format {
            PageFormat::Html { selector } => parse_html_headlines(&body, site.url, selector)?,
            PageFormat::Rss => parse_rss_headlines(&body)?,
        };

        info!(count = headlines.len(), url = site.url, "Parsed headlines");
        Ok(SourceResponse {
            source,
            category,
            headlines,
        })
    }
}
