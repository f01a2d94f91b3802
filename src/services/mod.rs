pub mod pipeline;
pub mod providers;
pub mod recommendations;
pub mod resolver;
pub mod session;
pub mod sorter;

pub use pipeline::{run_search, SearchBundle, SearchOutcome};
pub use providers::{AnimeProvider, JikanProvider};
pub use recommendations::RecommendationSet;
pub use session::{PipelineStatus, SearchSession, SearchTicket, SessionSnapshot};
pub use sorter::SortedViews;
