//! View models for the dashboard templates.

use chrono::{DateTime, Utc};

use crate::category::CategoryFilter;
use crate::filter::FilterState;
use crate::highlight::{highlight, Segment};
use crate::news::TaggedNewsItem;

/// Category badges shown per card.
const MAX_BADGES: usize = 2;

pub struct Ticker {
    pub symbol: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

impl Ticker {
    pub fn is_up(&self) -> bool {
        self.change.starts_with('+')
    }
}

/// Static ticker strip. These are display values, not market data.
pub const TICKERS: &[Ticker] = &[
    Ticker { symbol: "SPY", value: "513.42", change: "+1.24%" },
    Ticker { symbol: "QQQ", value: "437.18", change: "-0.38%" },
    Ticker { symbol: "AAPL", value: "178.90", change: "+0.95%" },
    Ticker { symbol: "MSFT", value: "415.20", change: "+2.10%" },
    Ticker { symbol: "TSLA", value: "193.57", change: "-1.73%" },
    Ticker { symbol: "NVDA", value: "875.43", change: "+3.42%" },
    Ticker { symbol: "BTC", value: "67,234", change: "+1.88%" },
    Ticker { symbol: "ETH", value: "3,521", change: "+0.44%" },
    Ticker { symbol: "GOLD", value: "2,312", change: "-0.12%" },
    Ticker { symbol: "DXY", value: "104.23", change: "+0.08%" },
];

pub struct CategoryButton {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub fn category_buttons(active: CategoryFilter) -> Vec<CategoryButton> {
    CategoryFilter::choices()
        .map(|choice| CategoryButton {
            id: choice.id(),
            label: choice.label(),
            active: choice == active,
        })
        .collect()
}

pub struct StoryCard {
    pub url: String,
    pub source: String,
    pub date: String,
    pub badges: Vec<&'static str>,
    pub headline: Vec<Segment>,
    pub summary: Vec<Segment>,
    pub feature: bool,
}

impl StoryCard {
    pub fn new(item: &TaggedNewsItem, query: &str, feature: bool) -> Self {
        Self {
            url: item.item.url().to_string(),
            source: item.item.source().to_string(),
            date: short_date(item.item.datetime),
            badges: item
                .categories
                .iter()
                .take(MAX_BADGES)
                .map(|c| c.label())
                .collect(),
            headline: highlight(item.item.headline(), query),
            summary: highlight(item.item.summary(), query),
            feature,
        }
    }
}

/// Build cards for the visible stories. Only an unfiltered view gets a
/// feature story.
pub fn story_cards(stories: &[&TaggedNewsItem], state: &FilterState) -> Vec<StoryCard> {
    let unfiltered = state.is_unfiltered();
    let query = state.query().unwrap_or_default();
    stories
        .iter()
        .enumerate()
        .map(|(i, item)| StoryCard::new(item, query, unfiltered && i == 0))
        .collect()
}

/// `Mar 5` style date in UTC; empty for timestamps out of range.
pub fn short_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// Line above the grid, e.g. `2 stories · Crypto · "btc"`.
pub fn results_summary(count: usize, state: &FilterState) -> String {
    let mut summary = match count {
        0 => "No results".to_string(),
        1 => "1 story".to_string(),
        n => format!("{} stories", n),
    };

    if let CategoryFilter::Only(category) = state.category {
        summary.push_str(" · ");
        summary.push_str(category.label());
    }

    if let Some(query) = state.query() {
        summary.push_str(&format!(" · \"{}\"", query));
    }

    summary
}
