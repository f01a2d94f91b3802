use crate::{
    error::AppResult,
    models::{Limit, Recommendation},
    services::providers::AnimeProvider,
};

/// The recommendations kept for one search, in API order.
///
/// Length is always `min(limit, available)` and never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSet {
    items: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Keeps the first `limit` items; `None` when there is nothing to keep
    pub fn truncated(mut recommendations: Vec<Recommendation>, limit: Limit) -> Option<Self> {
        if recommendations.is_empty() {
            return None;
        }
        recommendations.truncate(limit.get());
        Some(Self {
            items: recommendations,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }
}

/// Fetches the recommendations for an entry and truncates them to `limit`.
///
/// `Ok(None)` means the API has no recommendations for the entry.
pub async fn fetch_recommendations(
    provider: &dyn AnimeProvider,
    anime_id: u64,
    limit: Limit,
) -> AppResult<Option<RecommendationSet>> {
    let recommendations = provider.fetch_recommendations(anime_id).await?;
    let available = recommendations.len();
    let set = RecommendationSet::truncated(recommendations, limit);

    tracing::info!(
        anime_id = anime_id,
        available = available,
        kept = set.as_ref().map_or(0, RecommendationSet::len),
        limit = %limit,
        "Recommendation set built"
    );

    Ok(set)
}
