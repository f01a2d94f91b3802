#![allow(dead_code)]

use anirec::{
    error::AppResult,
    models::{AnimeEntry, Recommendation, SearchQuery},
    services::AnimeProvider,
};
use mockall::mock;

mock! {
    pub Provider {}

    #[async_trait::async_trait]
    impl AnimeProvider for Provider {
        async fn search_anime(&self, query: &SearchQuery, limit: u32) -> AppResult<Vec<AnimeEntry>>;
        async fn fetch_recommendations(&self, anime_id: u64) -> AppResult<Vec<Recommendation>>;
        fn name(&self) -> &'static str;
    }
}

/// A mock provider that answers `name()`; lookups still need expectations
pub fn mock_provider() -> MockProvider {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("mock");
    provider
}

pub fn entry(id: u64, title: &str) -> AnimeEntry {
    AnimeEntry {
        mal_id: id,
        title: title.to_string(),
        url: format!("https://myanimelist.net/anime/{id}"),
        image_url: Some(format!("https://cdn.myanimelist.net/images/anime/{id}.jpg")),
    }
}

pub fn recommendation(id: u64, title: &str, votes: u64) -> Recommendation {
    Recommendation {
        entry: entry(id, title),
        votes,
        url: format!("https://myanimelist.net/recommendations/anime/20-{id}"),
    }
}

/// Five recommendations with votes [10, 50, 30, 5, 20] and titles [B, A, E, C, D]
pub fn naruto_recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(101, "B", 10),
        recommendation(102, "A", 50),
        recommendation(103, "E", 30),
        recommendation(104, "C", 5),
        recommendation(105, "D", 20),
    ]
}

/// Provider expecting exactly one "Naruto" search and one recommendation fetch
pub fn naruto_provider() -> MockProvider {
    let mut provider = mock_provider();
    provider
        .expect_search_anime()
        .withf(|query, limit| query.encoded() == "Naruto" && *limit == 1)
        .times(1)
        .returning(|_, _| Ok(vec![entry(20, "Naruto")]));
    provider
        .expect_fetch_recommendations()
        .withf(|id| *id == 20)
        .times(1)
        .returning(|_| Ok(naruto_recommendations()));
    provider
}
