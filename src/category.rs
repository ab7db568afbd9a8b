use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Topic assigned to a news item by keyword matching.
///
/// Variants are declared in matching order; [`Category::ALL`] follows the
/// same order and every tagging result preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Markets,
    Tech,
    Economy,
    Crypto,
    Commodities,
    Earnings,
}

/// Category assigned when no keyword matches.
pub const DEFAULT_CATEGORY: Category = Category::Markets;

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Markets,
        Category::Tech,
        Category::Economy,
        Category::Crypto,
        Category::Commodities,
        Category::Earnings,
    ];

    /// Identifier used in query strings and JSON.
    pub fn id(self) -> &'static str {
        match self {
            Category::Markets => "markets",
            Category::Tech => "tech",
            Category::Economy => "economy",
            Category::Crypto => "crypto",
            Category::Commodities => "commodities",
            Category::Earnings => "earnings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Markets => "Markets",
            Category::Tech => "Technology",
            Category::Economy => "Economy",
            Category::Crypto => "Crypto",
            Category::Commodities => "Commodities",
            Category::Earnings => "Earnings",
        }
    }

    /// Lowercase keyword triggers, matched as plain substrings.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Markets => &[
                "stock",
                "market",
                "s&p",
                "nasdaq",
                "dow",
                "equity",
                "shares",
                "wall street",
                "index",
                "rally",
                "sell-off",
            ],
            Category::Tech => &[
                "tech",
                "technology",
                "ai",
                "software",
                "apple",
                "google",
                "microsoft",
                "meta",
                "amazon",
                "nvidia",
                "semiconductor",
            ],
            Category::Economy => &[
                "fed",
                "federal reserve",
                "inflation",
                "gdp",
                "interest rate",
                "economy",
                "recession",
                "jobs",
                "unemployment",
                "cpi",
                "fiscal",
            ],
            Category::Crypto => &[
                "bitcoin",
                "ethereum",
                "crypto",
                "blockchain",
                "btc",
                "eth",
                "defi",
                "token",
                "nft",
                "web3",
            ],
            Category::Commodities => &[
                "gold",
                "oil",
                "silver",
                "commodity",
                "crude",
                "energy",
                "natural gas",
                "copper",
                "wheat",
            ],
            Category::Earnings => &[
                "earnings",
                "revenue",
                "profit",
                "loss",
                "quarterly",
                "eps",
                "guidance",
                "forecast",
                "beat",
                "miss",
            ],
        }
    }

    /// Whether any keyword occurs in `lowercase_text`.
    pub fn matches(self, lowercase_text: &str) -> bool {
        self.keywords().iter().any(|kw| lowercase_text.contains(kw))
    }
}

/// Tag `headline` + `summary` with every matching category.
///
/// Never returns an empty list: text with no keyword hits falls back to
/// [`DEFAULT_CATEGORY`].
pub fn categorize(headline: &str, summary: &str) -> Vec<Category> {
    let text = format!("{} {}", headline, summary).to_lowercase();

    let matched: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|category| category.matches(&text))
        .collect();

    if matched.is_empty() {
        vec![DEFAULT_CATEGORY]
    } else {
        matched
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Active category selector: no restriction, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn id(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn is_all(self) -> bool {
        self == CategoryFilter::All
    }

    /// The "all" sentinel followed by each category, in button order.
    pub fn choices() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    /// Empty input and `all` both select the sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.to_ascii_lowercase().parse().map(CategoryFilter::Only)
    }
}
