use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::{categorize, Category};

/// A news item as delivered by the upstream provider.
///
/// Text fields may be missing from the payload. Fields this crate does not
/// read (`id`, `image`, `related`, ...) are kept in `extra` so the item
/// serializes back to the provider's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub datetime: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewsItem {
    pub fn headline(&self) -> &str {
        self.headline.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

/// A news item plus the categories its text matched. `categories` is never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedNewsItem {
    #[serde(flatten)]
    pub item: NewsItem,
    pub categories: Vec<Category>,
}

impl TaggedNewsItem {
    pub fn new(item: NewsItem) -> Self {
        let categories = categorize(item.headline(), item.summary());
        Self { item, categories }
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Tag the first `limit` items, keeping upstream order.
pub fn tag_items(items: Vec<NewsItem>, limit: usize) -> Vec<TaggedNewsItem> {
    items
        .into_iter()
        .take(limit)
        .map(TaggedNewsItem::new)
        .collect()
}
