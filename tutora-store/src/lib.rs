pub mod app_config;
pub mod document;
pub mod local_cache;
pub mod pricing_repo;
pub mod redis_repo;

pub use document::InMemoryDocumentStore;
pub use local_cache::{FileConfigCache, MemoryConfigCache};
pub use pricing_repo::{load_admin_pricing_config, save_admin_pricing_config, PricingConfigRepository};
pub use redis_repo::RedisClient;
