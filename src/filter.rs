use crate::category::CategoryFilter;
use crate::news::TaggedNewsItem;

/// Most stories shown for any filter combination.
pub const MAX_VISIBLE_STORIES: usize = 6;

/// Per-request filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search: String,
}

impl FilterState {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// The search text as typed, or `None` when it is blank. Whitespace
    /// only decides whether a search is active; it is never stripped.
    pub fn query(&self) -> Option<&str> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.as_str())
        }
    }

    /// True when neither a category nor a search narrows the result.
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_all() && self.query().is_none()
    }
}

fn field_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|text| text.to_lowercase().contains(needle))
}

fn matches_search(item: &TaggedNewsItem, needle: &str) -> bool {
    field_contains(item.item.headline.as_deref(), needle)
        || field_contains(item.item.summary.as_deref(), needle)
        || field_contains(item.item.source.as_deref(), needle)
}

/// Select the visible stories: category first, then search, then the
/// [`MAX_VISIBLE_STORIES`] cap. Input order is preserved.
pub fn apply<'a>(items: &'a [TaggedNewsItem], state: &FilterState) -> Vec<&'a TaggedNewsItem> {
    let needle = state.query().map(str::to_lowercase);

    items
        .iter()
        .filter(|item| match state.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.has_category(category),
        })
        .filter(|item| match &needle {
            Some(needle) => matches_search(item, needle),
            None => true,
        })
        .take(MAX_VISIBLE_STORIES)
        .collect()
}
