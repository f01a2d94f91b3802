use std::sync::Arc;

use crate::{
    db::SearchTermStore,
    models::{Limit, SortOrder},
    services::{AnimeProvider, SearchSession},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn AnimeProvider>,
    pub store: Arc<dyn SearchTermStore>,
    pub session: Arc<SearchSession>,
    /// Pre-filled limit when the page is first shown
    pub default_limit: Limit,
    /// Order used when a request does not name one
    pub default_sort: SortOrder,
}

impl AppState {
    /// Creates state with an idle session
    pub fn new(provider: Arc<dyn AnimeProvider>, store: Arc<dyn SearchTermStore>) -> Self {
        Self {
            provider,
            store,
            session: Arc::new(SearchSession::new()),
            default_limit: Limit::default(),
            default_sort: SortOrder::default(),
        }
    }

    pub fn with_defaults(mut self, limit: Limit, sort: SortOrder) -> Self {
        self.default_limit = limit;
        self.default_sort = sort;
        self
    }
}
