pub mod postgres;
pub mod preferences;
pub mod redis;

pub use postgres::{create_pool, PgPreferenceStore};
pub use preferences::{InMemoryPreferenceStore, PreferenceStore};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
