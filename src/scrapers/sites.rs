//! Where each source publishes each category, and how to read it.

use crate::models::{Category, Source};

/// How a section page lists its headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// An HTML page whose headline links match a CSS selector.
    Html { selector: &'static str },
    /// An RSS 2.0 feed; each `<item>` carries a `<title>` and `<link>`.
    Rss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub url: &'static str,
    pub format: PageFormat,
}

const CNN_LITE: Site = Site {
    url: "https://lite.cnn.com",
    format: PageFormat::Html {
        selector: ".card--lite a[href]",
    },
};

/// Look up the page for a `(source, category)` pair.
///
/// Returns `None` when the source does not publish that category.
pub fn site_for(source: Source, category: Category) -> Option<Site> {
    let site = match (source, category) {
        (Source::Ap, Category::Politics) => Site {
            url: "https://apnews.com/politics",
            format: PageFormat::Html {
                selector: ".PagePromo-title a.Link",
            },
        },
        (Source::Ap, Category::World) => Site {
            url: "https://apnews.com/world-news",
            format: PageFormat::Html {
                selector: ".PagePromo-title a.Link",
            },
        },
        (Source::Cnn, Category::Politics) => CNN_LITE,
        (Source::Cnn, Category::World) => Site {
            url: "http://rss.cnn.com/rss/cnn_world.rss",
            format: PageFormat::Rss,
        },
        (Source::Fox, Category::Politics) => Site {
            url: "https://moxie.foxnews.com/google-publisher/politics.xml",
            format: PageFormat::Rss,
        },
        (Source::Fox, Category::World) => Site {
            url: "https://moxie.foxnews.com/google-publisher/world.xml",
            format: PageFormat::Rss,
        },
        (Source::Npr, Category::Politics) => Site {
            url: "https://feeds.npr.org/1014/rss.xml",
            format: PageFormat::Rss,
        },
        (Source::Npr, Category::World) => Site {
            url: "https://feeds.npr.org/1004/rss.xml",
            format: PageFormat::Rss,
        },
        (Source::WashExam, Category::Politics) => Site {
            url: "https://www.washingtonexaminer.com/politics/",
            format: PageFormat::Html {
                selector: "h2 a[href], h3 a[href]",
            },
        },
        (Source::WashExam, Category::World) => return None,
    };
    Some(site)
}
