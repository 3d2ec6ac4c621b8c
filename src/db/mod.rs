pub mod cache;
pub mod cached;
pub mod catalog;
pub mod memory;
pub mod postgres;

mod macros;

pub use cache::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
pub use cached::CachedStore;
pub use catalog::{ResourceCatalog, ResourceStore};
pub use memory::InMemoryStore;
pub use postgres::{create_pool, PgResourceStore};
