use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{AnimeEntry, Limit, SearchQuery},
    services::{
        providers::AnimeProvider, recommendations::fetch_recommendations, resolver::resolve_title,
        sorter::SortedViews,
    },
};

/// Immutable result of one successful search run
#[derive(Debug, Clone)]
pub struct SearchBundle {
    /// Search text as entered
    pub query: String,
    /// Entry the search resolved to
    pub source: AnimeEntry,
    pub views: SortedViews,
    pub fetched_at: DateTime<Utc>,
}

/// How a search run ended when no transport or parse error occurred
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The title lookup matched nothing
    NoResults,
    /// The title resolved but has no recommendations
    NoRecommendations { source: AnimeEntry },
    Found(SearchBundle),
}

/// Runs resolve → fetch → sort for one query.
///
/// Stops after the first stage that comes back empty; errors from either
/// request abort the run.
pub async fn run_search(
    provider: &dyn AnimeProvider,
    query: &SearchQuery,
    limit: Limit,
) -> AppResult<SearchOutcome> {
    let Some(source) = resolve_title(provider, query).await? else {
        return Ok(SearchOutcome::NoResults);
    };

    let Some(set) = fetch_recommendations(provider, source.mal_id, limit).await? else {
        return Ok(SearchOutcome::NoRecommendations { source });
    };

    Ok(SearchOutcome::Found(SearchBundle {
        query: query.entered().to_string(),
        source,
        views: SortedViews::build(set),
        fetched_at: Utc::now(),
    }))
}
