//! Cache
//!
//! Este módulo contiene la cache de consultas y su tabla de invalidación.

pub mod cache_config;
pub mod invalidation;
pub mod query_cache;

pub use cache_config::QueryCacheConfig;
pub use invalidation::{Invalidation, Mutation, QueryFamily, QueryKey};
pub use query_cache::{CacheStats, QueryCache, QueryState};
