use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::category::{CategoryFilter, ParseCategoryError};
use crate::config::Config;
use crate::error::AppResult;
use crate::filter::{self, FilterState};
use crate::news::{tag_items, TaggedNewsItem};
use crate::upstream::{NewsClient, UpstreamError};
use crate::view::{self, CategoryButton, StoryCard, Ticker, TICKERS};

pub struct AppState {
    pub config: Config,
    pub client: NewsClient,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/stories", get(stories))
        .route("/api/news", get(news))
        .route("/api/stories", get(api_stories))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Filter selection taken from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

impl FilterQuery {
    pub fn into_state(self) -> Result<FilterState, ParseCategoryError> {
        let category: CategoryFilter = self.category.parse()?;
        Ok(FilterState::new(category, self.q))
    }
}

/// Banner text when the upstream feed fails. The error itself is only logged.
const FEED_UNAVAILABLE: &str = "The provider could not be reached. Try again shortly.";

/// Everything the story grid partial renders.
pub struct StoryGrid {
    pub error: Option<String>,
    pub summary: String,
    pub cards: Vec<StoryCard>,
    pub unfiltered: bool,
}

impl StoryGrid {
    fn build(loaded: &Result<Vec<TaggedNewsItem>, UpstreamError>, state: &FilterState) -> Self {
        match loaded {
            Ok(items) => {
                let visible = filter::apply(items, state);
                Self {
                    error: None,
                    summary: view::results_summary(visible.len(), state),
                    cards: view::story_cards(&visible, state),
                    unfiltered: state.is_unfiltered(),
                }
            }
            Err(_) => Self {
                error: Some(FEED_UNAVAILABLE.to_string()),
                summary: String::new(),
                cards: Vec::new(),
                unfiltered: state.is_unfiltered(),
            },
        }
    }

    fn status(&self) -> StatusCode {
        if self.error.is_some() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::OK
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub date_line: String,
    pub time_line: String,
    pub year: i32,
    pub tickers: Vec<&'static Ticker>,
    pub buttons: Vec<CategoryButton>,
    pub search: String,
    pub grid: StoryGrid,
}

#[derive(Template)]
#[template(path = "stories.html")]
pub struct StoriesTemplate {
    pub grid: StoryGrid,
}

#[derive(Debug, Serialize)]
pub struct StoriesResponse {
    pub count: usize,
    pub stories: Vec<TaggedNewsItem>,
}

fn render<T: Template>(status: StatusCode, template: &T) -> AppResult<Response> {
    let html = template.render()?;
    Ok((status, Html(html)).into_response())
}

async fn load_stories(state: &AppState) -> Result<Vec<TaggedNewsItem>, UpstreamError> {
    let items = state.client.fetch_items().await?;
    Ok(tag_items(items, state.config.item_limit))
}

fn log_failure(loaded: &Result<Vec<TaggedNewsItem>, UpstreamError>) {
    if let Err(err) = loaded {
        warn!("Rendering dashboard without stories: {}", err);
    }
}

// Route handlers
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Response> {
    let filter_state = query.into_state()?;
    let loaded = load_stories(&state).await;
    log_failure(&loaded);

    let now = Utc::now();
    let grid = StoryGrid::build(&loaded, &filter_state);
    let status = grid.status();

    let template = IndexTemplate {
        date_line: now.format("%A, %B %-d, %Y").to_string(),
        time_line: now.format("%H:%M UTC").to_string(),
        year: now.year(),
        tickers: TICKERS.iter().chain(TICKERS.iter()).collect(),
        buttons: view::category_buttons(filter_state.category),
        search: filter_state.search.clone(),
        grid,
    };

    render(status, &template)
}

/// Story grid fragment for htmx swaps.
pub async fn stories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Response> {
    let filter_state = query.into_state()?;
    let loaded = load_stories(&state).await;
    log_failure(&loaded);

    let grid = StoryGrid::build(&loaded, &filter_state);
    let status = grid.status();

    render(status, &StoriesTemplate { grid })
}

/// Upstream feed, relayed byte for byte.
pub async fn news(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let body = state.client.fetch_raw().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn api_stories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<StoriesResponse>> {
    let filter_state = query.into_state()?;
    let items = load_stories(&state).await?;

    let stories: Vec<TaggedNewsItem> = filter::apply(&items, &filter_state)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(StoriesResponse {
        count: stories.len(),
        stories,
    }))
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
