use std::sync::Arc;

use redis::AsyncCommands;
use redis::Client;
use tokio::sync::{mpsc, RwLock};

use crate::db::search_store::{SearchTermStore, SEARCH_TERM_KEY};
use crate::error::{AppError, AppResult};

/// Creates a Redis client for the last-search store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed last-search store.
///
/// Writes are handed to a background task so a slow or unavailable Redis
/// never delays a page response, which makes them eventually consistent:
/// `save` returns before the value reaches Redis. The last term saved by
/// this process is kept locally and served by `load`, so a page rendered
/// right after a save never shows the previous term. Redis is only read
/// when this process has not saved anything yet.
#[derive(Clone)]
pub struct RedisSearchTermStore {
    redis_client: Client,
    key: String,
    write_tx: mpsc::UnboundedSender<String>,
    latest: Arc<RwLock<Option<String>>>,
}

/// Handle for gracefully shutting down the store writer
pub struct StoreWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl StoreWriterHandle {
    /// Signals the writer task and waits until pending writes are flushed
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Store writer shutdown signal sent");
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Store writer task panicked");
        }
    }
}

impl RedisSearchTermStore {
    /// Creates the store and spawns its background writer
    pub fn new(redis_client: Client) -> (Self, StoreWriterHandle) {
        Self::with_key(redis_client, SEARCH_TERM_KEY)
    }

    pub fn with_key(redis_client: Client, key: impl Into<String>) -> (Self, StoreWriterHandle) {
        let key = key.into();
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let client = redis_client.clone();
        let writer_key = key.clone();
        let task = tokio::spawn(async move {
            Self::writer_task(client, writer_key, write_rx, shutdown_rx).await;
        });

        let store = Self {
            redis_client,
            key,
            write_tx,
            latest: Arc::new(RwLock::new(None)),
        };

        (store, StoreWriterHandle { shutdown_tx, task })
    }

    /// Writes queued terms until shutdown, then flushes what is left
    async fn writer_task(
        client: Client,
        key: String,
        mut write_rx: mpsc::UnboundedReceiver<String>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(key = %key, "Store writer task started");

        loop {
            tokio::select! {
                Some(term) = write_rx.recv() => {
                    if let Err(e) = Self::write_to_redis(&client, &key, term).await {
                        tracing::error!(error = %e, "Failed to write last search to Redis");
                    }
                }
                _ = shutdown_rx.recv() => {
                    write_rx.close();
                    while let Some(term) = write_rx.recv().await {
                        if let Err(e) = Self::write_to_redis(&client, &key, term).await {
                            tracing::error!(error = %e, "Failed to flush last search during shutdown");
                        }
                    }

                    tracing::info!("Store writer task stopped");
                    break;
                }
            }
        }
    }

    async fn write_to_redis(client: &Client, key: &str, term: String) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, term).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SearchTermStore for RedisSearchTermStore {
    async fn load(&self) -> AppResult<Option<String>> {
        if let Some(term) = self.latest.read().await.clone() {
            return Ok(Some(term));
        }

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let term: Option<String> = conn.get(self.key.as_str()).await?;
        Ok(term)
    }

    async fn save(&self, term: &str) -> AppResult<()> {
        self.write_tx
            .send(term.to_string())
            .map_err(|e| AppError::Internal(format!("Store writer is gone: {}", e)))?;
        *self.latest.write().await = Some(term.to_string());
        Ok(())
    }
}
