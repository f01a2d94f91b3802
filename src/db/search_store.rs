use tokio::sync::RwLock;

use crate::error::AppResult;

/// Key under which the last entered search text is stored
pub const SEARCH_TERM_KEY: &str = "anirec:last-search";

/// Remembers the last text entered in the search field
#[async_trait::async_trait]
pub trait SearchTermStore: Send + Sync {
    /// Returns `None` when nothing has been stored yet
    async fn load(&self) -> AppResult<Option<String>>;

    /// Stores `term`; a following `load` in the same process returns it even
    /// if the backing store persists it later
    async fn save(&self, term: &str) -> AppResult<()>;
}

/// Process-local store used when no Redis URL is configured
#[derive(Default)]
pub struct MemorySearchTermStore {
    term: RwLock<Option<String>>,
}

impl MemorySearchTermStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SearchTermStore for MemorySearchTermStore {
    async fn load(&self) -> AppResult<Option<String>> {
        Ok(self.term.read().await.clone())
    }

    async fn save(&self, term: &str) -> AppResult<()> {
        *self.term.write().await = Some(term.to_string());
        Ok(())
    }
}
