use crate::{
    error::AppResult,
    models::{AnimeEntry, SearchQuery},
    services::providers::AnimeProvider,
};

/// Only the single best match is needed to look up recommendations
const RESOLVE_LIMIT: u32 = 1;

/// Resolves a free-text query to the best matching entry.
///
/// `Ok(None)` means the API answered but found nothing.
pub async fn resolve_title(
    provider: &dyn AnimeProvider,
    query: &SearchQuery,
) -> AppResult<Option<AnimeEntry>> {
    let entry = provider
        .search_anime(query, RESOLVE_LIMIT)
        .await?
        .into_iter()
        .next();

    match &entry {
        Some(entry) => tracing::info!(
            query = %query,
            anime_id = entry.mal_id,
            title = %entry.title,
            provider = provider.name(),
            "Title resolved"
        ),
        None => tracing::info!(query = %query, provider = provider.name(), "No matching title"),
    }

    Ok(entry)
}
