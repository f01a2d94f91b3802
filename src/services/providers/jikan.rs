/// Jikan (unofficial MyAnimeList) API provider
///
/// API Flow:
/// 1. Title Search: /anime?q={term}&limit=1 → best matching entry
/// 2. Recommendations: /anime/{mal_id}/recommendations → vote-weighted list
///
/// Both endpoints wrap their payload in `{ "data": [...] }`; an absent or
/// empty `data` array means nothing was found.
use crate::{
    error::{AppError, AppResult},
    models::{
        AnimeEntry, JikanAnime, JikanRecommendation, JikanResponse, Recommendation, SearchQuery,
    },
    services::providers::AnimeProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct JikanProvider {
    http_client: HttpClient,
    api_url: String,
}

impl JikanProvider {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &SearchQuery, limit: u32) -> String {
        format!("{}/anime?q={}&limit={}", self.api_url, query.encoded(), limit)
    }

    fn recommendations_url(&self, anime_id: u64) -> String {
        format!("{}/anime/{}/recommendations", self.api_url, anime_id)
    }

    /// GET a Jikan list endpoint and decode its `data` array
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> AppResult<Vec<T>> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Jikan API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(url = %url, response = %response_text, "Raw Jikan API response");

        parse_list(&response_text)
    }
}

/// Decode a Jikan envelope, mapping shape errors to `MalformedResponse`
fn parse_list<T: DeserializeOwned>(body: &str) -> AppResult<Vec<T>> {
    let envelope: JikanResponse<T> = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, response = %body, "Failed to deserialize Jikan response");
        AppError::MalformedResponse(format!("Failed to parse Jikan response: {}", e))
    })?;

    Ok(envelope.into_data())
}

#[async_trait::async_trait]
impl AnimeProvider for JikanProvider {
    async fn search_anime(&self, query: &SearchQuery, limit: u32) -> AppResult<Vec<AnimeEntry>> {
        let url = self.search_url(query, limit);
        let results: Vec<JikanAnime> = self.get_list(&url).await?;
        let entries: Vec<AnimeEntry> = results.into_iter().map(AnimeEntry::from).collect();

        tracing::info!(
            query = %query,
            results = entries.len(),
            provider = "jikan",
            "Anime search completed"
        );

        Ok(entries)
    }

    async fn fetch_recommendations(&self, anime_id: u64) -> AppResult<Vec<Recommendation>> {
        let url = self.recommendations_url(anime_id);
        let results: Vec<JikanRecommendation> = self.get_list(&url).await?;
        let recommendations: Vec<Recommendation> =
            results.into_iter().map(Recommendation::from).collect();

        tracing::info!(
            anime_id = anime_id,
            results = recommendations.len(),
            provider = "jikan",
            "Recommendations fetched"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "jikan"
    }
}
