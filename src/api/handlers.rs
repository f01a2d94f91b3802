use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{AnimeEntry, Limit, Recommendation, SearchQuery, SortOrder},
    presenter::{self, PageContext},
    services::{run_search, SearchOutcome},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub limit: String,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LastSearchForm {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub q: String,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub query: String,
    pub sort: SortOrder,
    /// Entry the query resolved to; absent when nothing matched
    pub source: Option<AnimeEntry>,
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
    pub fetched_at: Option<DateTime<Utc>>,
}

fn parse_sort(value: Option<&str>, default: SortOrder) -> AppResult<SortOrder> {
    match value {
        Some(value) if !value.is_empty() => value.parse(),
        _ => Ok(default),
    }
}

/// Loads the stored search term; store failures only cost the pre-fill
async fn stored_term(state: &AppState) -> String {
    match state.store.load().await {
        Ok(term) => term.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load last search term");
            String::new()
        }
    }
}

async fn remember_term(state: &AppState, term: &str) {
    if let Err(e) = state.store.save(term).await {
        tracing::warn!(error = %e, "Failed to save last search term");
    }
}

/// Renders the page from the current session without fetching anything
async fn render_current(
    state: &AppState,
    term: &str,
    limit: &str,
    sort: SortOrder,
    status_override: Option<String>,
) -> String {
    let snapshot = state.session.snapshot().await;
    presenter::render_page(&PageContext {
        snapshot: &snapshot,
        search_term: term,
        limit,
        sort,
        status_override,
    })
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// The search page, showing the live results in the requested order
pub async fn index(State(state): State<AppState>, Query(params): Query<PageParams>) -> Response {
    let term = stored_term(&state).await;
    let limit = state
        .session
        .snapshot()
        .await
        .limit
        .unwrap_or(state.default_limit)
        .to_string();

    match parse_sort(params.sort.as_deref(), state.default_sort) {
        Ok(sort) => Html(render_current(&state, &term, &limit, sort, None).await).into_response(),
        Err(e) => {
            let page = render_current(
                &state,
                &term,
                &limit,
                state.default_sort,
                Some(e.status_message()),
            )
            .await;
            (e.status_code(), Html(page)).into_response()
        }
    }
}

/// Runs a search from the page form and renders the outcome
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    let sort = match parse_sort(form.sort.as_deref(), state.default_sort) {
        Ok(sort) => sort,
        Err(e) => {
            let page = render_current(
                &state,
                &form.term,
                &form.limit,
                state.default_sort,
                Some(e.status_message()),
            )
            .await;
            return (e.status_code(), Html(page)).into_response();
        }
    };

    remember_term(&state, &form.term).await;

    let Some(query) = SearchQuery::parse(&form.term) else {
        return Html(render_current(&state, &form.term, &form.limit, sort, None).await)
            .into_response();
    };

    let limit = match form.limit.parse::<Limit>() {
        Ok(limit) => limit,
        Err(e) => {
            let page = render_current(
                &state,
                &form.term,
                &form.limit,
                sort,
                Some(e.status_message()),
            )
            .await;
            return (e.status_code(), Html(page)).into_response();
        }
    };

    let ticket = state.session.begin(&query, limit).await;
    tracing::info!(
        ticket = ticket.value(),
        query = %query,
        limit = %limit,
        sort = %sort,
        "Processing search request"
    );

    let result = run_search(state.provider.as_ref(), &query, limit).await;
    state.session.complete(ticket, &query, result).await;

    Html(render_current(&state, &form.term, &form.limit, sort, None).await).into_response()
}

/// Results region only, re-rendered from the live bundle
pub async fn results(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Html<String>> {
    let sort = parse_sort(params.sort.as_deref(), state.default_sort)?;
    let snapshot = state.session.snapshot().await;
    Ok(Html(presenter::render_results_region(&snapshot, sort)))
}

/// Persists the search field whenever it changes
pub async fn save_last_search(
    State(state): State<AppState>,
    Form(form): Form<LastSearchForm>,
) -> AppResult<StatusCode> {
    state.store.save(&form.term).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stateless JSON search; does not touch the page session
pub async fn api_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<RecommendationsResponse>> {
    let query = SearchQuery::parse(&params.q)
        .ok_or_else(|| AppError::InvalidInput("Search query cannot be empty".to_string()))?;
    let limit = match params.limit.as_deref() {
        Some(limit) => limit.parse()?,
        None => state.default_limit,
    };
    let sort = parse_sort(params.sort.as_deref(), state.default_sort)?;

    let outcome = run_search(state.provider.as_ref(), &query, limit).await?;

    let response = match outcome {
        SearchOutcome::NoResults => RecommendationsResponse {
            query: query.to_string(),
            sort,
            source: None,
            count: 0,
            recommendations: Vec::new(),
            fetched_at: None,
        },
        SearchOutcome::NoRecommendations { source } => RecommendationsResponse {
            query: query.to_string(),
            sort,
            source: Some(source),
            count: 0,
            recommendations: Vec::new(),
            fetched_at: None,
        },
        SearchOutcome::Found(bundle) => {
            let recommendations: Vec<Recommendation> =
                bundle.views.view(sort).cloned().collect();
            RecommendationsResponse {
                query: query.to_string(),
                sort,
                source: Some(bundle.source),
                count: recommendations.len(),
                recommendations,
                fetched_at: Some(bundle.fetched_at),
            }
        }
    };

    Ok(Json(response))
}
