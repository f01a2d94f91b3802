pub mod anime;
pub mod query;
pub mod sort_order;

pub use anime::{
    AnimeEntry, JikanAnime, JikanImageUrls, JikanImages, JikanRecommendation, JikanResponse,
    Recommendation,
};
pub use query::{Limit, SearchQuery};
pub use sort_order::SortOrder;
