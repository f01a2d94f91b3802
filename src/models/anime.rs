use serde::{Deserialize, Serialize};

/// One anime title record as exposed to the rest of the crate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimeEntry {
    pub mal_id: u64,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
}

/// A vote-weighted link from the searched entry to another entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub entry: AnimeEntry,
    pub votes: u64,
    /// Discussion page explaining the recommendation
    pub url: String,
}

// ============================================================================
// Jikan API Types
// ============================================================================

/// Envelope shared by every Jikan list endpoint.
///
/// A missing or null `data` field is the API's "nothing found" signal.
#[derive(Debug, Clone, Deserialize)]
pub struct JikanResponse<T> {
    pub data: Option<Vec<T>>,
}

impl<T> JikanResponse<T> {
    pub fn into_data(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanImageUrls {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct JikanImages {
    #[serde(default)]
    pub jpg: Option<JikanImageUrls>,
}

/// Entry shape returned by `/anime?q=` and embedded in recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub images: JikanImages,
}

/// Item shape returned by `/anime/{id}/recommendations`
#[derive(Debug, Clone, Deserialize)]
pub struct JikanRecommendation {
    pub entry: JikanAnime,
    pub url: String,
    #[serde(default)]
    pub votes: u64,
}

impl From<JikanAnime> for AnimeEntry {
    fn from(anime: JikanAnime) -> Self {
        AnimeEntry {
            mal_id: anime.mal_id,
            title: anime.title,
            url: anime.url,
            image_url: anime.images.jpg.and_then(|jpg| jpg.image_url),
        }
    }
}

impl From<JikanRecommendation> for Recommendation {
    fn from(rec: JikanRecommendation) -> Self {
        Recommendation {
            entry: rec.entry.into(),
            votes: rec.votes,
            url: rec.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anime_search_deserialization() {
        let json = r#"{
            "pagination": {"last_visible_page": 1, "has_next_page": false},
            "data": [{
                "mal_id": 20,
                "url": "https://myanimelist.net/anime/20/Naruto",
                "images": {
                    "jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/13/17405.jpg"},
                    "webp": {"image_url": "https://cdn.myanimelist.net/images/anime/13/17405.webp"}
                },
                "title": "Naruto",
                "episodes": 220
            }]
        }"#;

        let response: JikanResponse<JikanAnime> = serde_json::from_str(json).unwrap();
        let entry = AnimeEntry::from(response.into_data().into_iter().next().unwrap());
        assert_eq!(entry.mal_id, 20);
        assert_eq!(entry.title, "Naruto");
        assert_eq!(entry.url, "https://myanimelist.net/anime/20/Naruto");
        assert_eq!(
            entry.image_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/13/17405.jpg")
        );
    }

    #[test]
    fn test_recommendation_deserialization() {
        let json = r#"{
            "data": [{
                "entry": {
                    "mal_id": 1735,
                    "url": "https://myanimelist.net/anime/1735/Naruto__Shippuuden",
                    "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/1565/111305.jpg"}},
                    "title": "Naruto: Shippuuden"
                },
                "url": "https://myanimelist.net/recommendations/anime/20-1735",
                "votes": 112
            }]
        }"#;

        let response: JikanResponse<JikanRecommendation> = serde_json::from_str(json).unwrap();
        let rec = Recommendation::from(response.into_data().into_iter().next().unwrap());
        assert_eq!(rec.votes, 112);
        assert_eq!(rec.entry.mal_id, 1735);
        assert_eq!(rec.entry.title, "Naruto: Shippuuden");
        assert_eq!(rec.url, "https://myanimelist.net/recommendations/anime/20-1735");
    }

    #[test]
    fn test_missing_data_decodes_as_empty() {
        let response: JikanResponse<JikanAnime> = serde_json::from_str("{}").unwrap();
        assert!(response.into_data().is_empty());

        let response: JikanResponse<JikanAnime> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(response.into_data().is_empty());
    }

    #[test]
    fn test_missing_image_is_none() {
        let json = r#"{"mal_id": 1, "url": "https://myanimelist.net/anime/1", "title": "Cowboy Bebop"}"#;
        let entry = AnimeEntry::from(serde_json::from_str::<JikanAnime>(json).unwrap());
        assert_eq!(entry.image_url, None);
    }
}
