pub mod redis_store;
pub mod search_store;

pub use redis_store::{create_redis_client, RedisSearchTermStore, StoreWriterHandle};
pub use search_store::{MemorySearchTermStore, SearchTermStore, SEARCH_TERM_KEY};
