//! Headline extraction from fetched HTML pages and RSS feeds.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::error::{NewsError, Result};
use crate::models::RawHeadline;

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static whitespace regex"));

/// Collapse runs of whitespace (newlines, tabs, nbsp) into single spaces.
pub fn clean_title(raw: &str) -> String {
    RE_WS.replace_all(raw, " ").trim().to_string()
}

/// Drop entries without a title or url and keep the first entry per url.
fn finish(headlines: impl Iterator<Item = RawHeadline>) -> Vec<RawHeadline> {
    headlines
        .filter(|h| !h.title.is_empty() && !h.url.is_empty())
        .unique_by(|h| h.url.clone())
        .collect()
}

/// Extract headlines from an HTML page.
///
/// Every element matching `selector` is expected to be (or sit inside) a link;
/// its text becomes the title and its `href`, resolved against `page_url`,
/// becomes the url.
pub fn parse_html_headlines(html: &str, page_url: &str, selector: &str) -> Result<Vec<RawHeadline>> {
    let base = Url::parse(page_url).map_err(|e| NewsError::Parse(format!("{page_url}: {e}")))?;
    let selector = Selector::parse(selector)
        .map_err(|e| NewsError::Parse(format!("selector '{selector}': {e}")))?;
    let document = Html::parse_document(html);

    let headlines = document.select(&selector).filter_map(|element| {
        let href = element.value().attr("href")?;
        let url = base.join(href).ok()?;
        let title = clean_title(&element.text().collect::<Vec<_>>().join(" "));
        Some(RawHeadline::new(title, url.to_string()))
    });
    Ok(finish(headlines))
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Extract headlines from an RSS 2.0 feed.
pub fn parse_rss_headlines(xml: &str) -> Result<Vec<RawHeadline>> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| NewsError::Parse(format!("rss: {e}")))?;
    let headlines = rss.channel.items.into_iter().filter_map(|item| {
        let title = clean_title(item.title.as_deref()?);
        let url = item.link?.trim().to_string();
        Some(RawHeadline::new(title, url))
    });
    Ok(finish(headlines))
}
