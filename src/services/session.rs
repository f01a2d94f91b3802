use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Limit, SearchQuery},
    services::pipeline::{SearchBundle, SearchOutcome},
};

/// Coarse pipeline status shown in the page's status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Searching { query: String },
    Success,
    NoResults { query: String },
    NoRecommendations { query: String },
    Failed { message: String },
}

/// Identifies one search run; later tickets supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Point-in-time copy of the session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub ticket: SearchTicket,
    pub status: PipelineStatus,
    pub bundle: Option<Arc<SearchBundle>>,
    /// Limit of the latest search; `None` until one has started
    pub limit: Option<Limit>,
}

/// Holds the single live search result.
///
/// `begin` hands out increasing tickets and drops the previous bundle;
/// `complete` only applies the outcome of the latest ticket, so a slow
/// earlier search can never overwrite a newer one.
pub struct SearchSession {
    state: RwLock<SessionSnapshot>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionSnapshot {
                ticket: SearchTicket(0),
                status: PipelineStatus::Idle,
                bundle: None,
                limit: None,
            }),
        }
    }

    /// Starts a new search, discarding whatever is currently displayed
    pub async fn begin(&self, query: &SearchQuery, limit: Limit) -> SearchTicket {
        let mut state = self.state.write().await;
        state.ticket = SearchTicket(state.ticket.0 + 1);
        state.status = PipelineStatus::Searching {
            query: query.entered().to_string(),
        };
        state.bundle = None;
        state.limit = Some(limit);

        tracing::debug!(ticket = state.ticket.0, query = %query, "Search started");
        state.ticket
    }

    /// Applies a finished run; returns false when a newer search has started since
    pub async fn complete(
        &self,
        ticket: SearchTicket,
        query: &SearchQuery,
        result: AppResult<SearchOutcome>,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.ticket != ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = state.ticket.0,
                query = %query,
                "Dropping stale search result"
            );
            return false;
        }

        let query = query.entered().to_string();
        let (status, bundle) = match result {
            Ok(SearchOutcome::Found(bundle)) => (PipelineStatus::Success, Some(Arc::new(bundle))),
            Ok(SearchOutcome::NoResults) => (PipelineStatus::NoResults { query }, None),
            Ok(SearchOutcome::NoRecommendations { .. }) => {
                (PipelineStatus::NoRecommendations { query }, None)
            }
            Err(e) => {
                tracing::error!(error = %e, ticket = ticket.0, query = %query, "Search failed");
                (
                    PipelineStatus::Failed {
                        message: e.status_message(),
                    },
                    None,
                )
            }
        };

        state.status = status;
        state.bundle = bundle;
        true
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }
}
