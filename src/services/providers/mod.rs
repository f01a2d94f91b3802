/// Anime data provider abstraction
///
/// The pipeline only talks to this trait, so the Jikan client can be swapped
/// for a mock in tests. A provider answers the two lookups a search needs:
/// the best matches for a title and the recommendations for one entry.
use crate::{
    error::AppResult,
    models::{AnimeEntry, Recommendation, SearchQuery},
};

pub mod jikan;

pub use jikan::JikanProvider;

#[async_trait::async_trait]
pub trait AnimeProvider: Send + Sync {
    /// Search for entries matching the query, best match first.
    ///
    /// An empty list means the API found nothing.
    async fn search_anime(&self, query: &SearchQuery, limit: u32) -> AppResult<Vec<AnimeEntry>>;

    /// Fetch the full recommendation list for one entry, in API order
    async fn fetch_recommendations(&self, anime_id: u64) -> AppResult<Vec<Recommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
