//! Cache de consultas
//!
//! Guarda en memoria los resultados del gateway por clave (recurso + parámetros),
//! expone el estado de cada consulta (cargando / error / éxito) e invalida las
//! claves que cada mutación declara. Sin refresco en segundo plano.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::cache_config::QueryCacheConfig;
use super::invalidation::{Invalidation, Mutation, QueryKey};
use crate::utils::errors::AppResult;

/// Estado observable de una consulta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    /// Nunca pedida o invalidada
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone)]
enum EntryState {
    Loading,
    Ready(Value),
    Failed(String),
}

/// Entrada en cache con metadatos
#[derive(Debug, Clone)]
struct CachedQuery {
    state: EntryState,
    /// Cambia con cada petición; un resultado tardío de otra generación se descarta
    generation: u64,
    fetched_at: Instant,
    last_accessed: Instant,
}

/// Estadísticas del cache
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_created: u64,
    pub entries_invalidated: u64,
    pub entries_evicted: u64,
}

pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, CachedQuery>>,
    config: QueryCacheConfig,
    stats: RwLock<CacheStats>,
    next_generation: AtomicU64,
}

impl QueryCache {
    pub fn new(config: QueryCacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            stats: RwLock::new(CacheStats::default()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Devuelve el valor en cache o ejecuta `fetcher` y guarda el resultado.
    ///
    /// Los errores no se cachean como valor: la siguiente llamada vuelve a pedir.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(value) = self.get::<T>(&key).await? {
            return Ok(value);
        }

        let generation = self.mark_loading(&key).await;
        match fetcher().await {
            Ok(value) => {
                self.store(&key, generation, serde_json::to_value(&value)?)
                    .await;
                Ok(value)
            }
            Err(e) => {
                self.mark_failed(&key, generation, e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Obtener un valor fresco del cache
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> AppResult<Option<T>> {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        let fresh = match entries.get_mut(key) {
            Some(entry) => match &entry.state {
                EntryState::Ready(value) if !self.is_stale(entry.fetched_at) => {
                    entry.last_accessed = Instant::now();
                    Some(value.clone())
                }
                _ => None,
            },
            None => None,
        };

        match fresh {
            Some(value) => {
                stats.hits += 1;
                debug!("📥 Cache HIT para clave: {}", key);
                Ok(Some(serde_json::from_value(value)?))
            }
            None => {
                stats.misses += 1;
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
        }
    }

    /// Estado actual de la consulta
    pub async fn state(&self, key: &QueryKey) -> QueryState {
        let entries = self.entries.read().await;
        match entries.get(key).map(|entry| &entry.state) {
            None => QueryState::Idle,
            Some(EntryState::Loading) => QueryState::Loading,
            Some(EntryState::Ready(_)) => QueryState::Success,
            Some(EntryState::Failed(message)) => QueryState::Error(message.clone()),
        }
    }

    /// Eliminar las claves que coinciden; devuelve cuántas se eliminaron
    pub async fn invalidate(&self, invalidation: &Invalidation) -> usize {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        let before = entries.len();
        entries.retain(|key, _| !invalidation.matches(key));
        let removed = before - entries.len();

        stats.entries_invalidated += removed as u64;
        if removed > 0 {
            debug!("🗑️ Invalidadas {} entradas para {:?}", removed, invalidation);
        }
        removed
    }

    /// Aplicar todas las aristas de invalidación de una mutación exitosa
    pub async fn apply(&self, mutation: &Mutation) -> usize {
        let mut removed = 0;
        for invalidation in mutation.invalidations() {
            removed += self.invalidate(&invalidation).await;
        }
        info!("♻️ {}: {} entradas de cache invalidadas", mutation.name(), removed);
        removed
    }

    /// Obtener estadísticas del cache
    pub async fn get_stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    /// Obtener tamaño actual del cache
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Limpiar todo el cache
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        info!("Cache de consultas limpiado completamente");
    }

    async fn mark_loading(&self, key: &QueryKey) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;

        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        if !entries.contains_key(key) && entries.len() >= self.config.max_entries {
            Self::evict_lru_entry(&mut entries, &mut stats);
        }

        let now = Instant::now();
        entries.insert(
            key.clone(),
            CachedQuery {
                state: EntryState::Loading,
                generation,
                fetched_at: now,
                last_accessed: now,
            },
        );
        generation
    }

    async fn store(&self, key: &QueryKey, generation: u64, value: Value) {
        let mut entries = self.entries.write().await;
        let mut stats = self.stats.write().await;

        match entries.get_mut(key) {
            Some(entry) if entry.generation == generation => {
                let now = Instant::now();
                entry.state = EntryState::Ready(value);
                entry.fetched_at = now;
                entry.last_accessed = now;
                stats.entries_created += 1;
                debug!("💾 Cache SET para clave: {}", key);
            }
            _ => {
                debug!("⏭️ Resultado descartado, la clave {} fue invalidada durante la carga", key);
            }
        }
    }

    async fn mark_failed(&self, key: &QueryKey, generation: u64, message: String) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            if entry.generation == generation {
                entry.state = EntryState::Failed(message);
            }
        }
    }

    fn is_stale(&self, fetched_at: Instant) -> bool {
        match self.config.stale_after {
            Some(max_age) => fetched_at.elapsed() >= max_age,
            None => false,
        }
    }

    /// Eliminar la entrada con acceso más antiguo
    fn evict_lru_entry(entries: &mut HashMap<QueryKey, CachedQuery>, stats: &mut CacheStats) {
        let oldest_key = entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            entries.remove(&key);
            stats.entries_evicted += 1;
            debug!("Entrada LRU eliminada: {}", key);
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::invalidation::QueryFamily;
    use crate::utils::errors::http_error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn list_key() -> QueryKey {
        QueryKey::of(QueryFamily::AllFleetAppointments)
    }

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = QueryCache::default();
        let calls = AtomicUsize::new(0);

        let first: Vec<u32> = cache
            .fetch(list_key(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2])
            })
            .await
            .unwrap();
        let second: Vec<u32> = cache
            .fetch(list_key(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![9])
            })
            .await
            .unwrap();

        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(&list_key()).await, QueryState::Success);

        let stats = cache.get_stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries_created, 1);
    }

    #[tokio::test]
    async fn test_error_is_not_cached() {
        let cache = QueryCache::default();

        let err = cache
            .fetch::<Vec<u32>, _, _>(list_key(), || async { Err(http_error(500, "boom")) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(cache.state(&list_key()).await, QueryState::Error("boom".to_string()));

        let retried: Vec<u32> = cache
            .fetch(list_key(), || async { Ok(vec![]) })
            .await
            .unwrap();
        assert!(retried.is_empty());
        assert_eq!(cache.state(&list_key()).await, QueryState::Success);
    }

    #[tokio::test]
    async fn test_mutation_forces_refetch() {
        let cache = QueryCache::default();
        let item = QueryKey::new(QueryFamily::SingleFleetAppointment, "a1");
        let news = QueryKey::of(QueryFamily::FleetNews);

        cache.fetch(list_key(), || async { Ok(1u32) }).await.unwrap();
        cache.fetch(item.clone(), || async { Ok(2u32) }).await.unwrap();
        cache.fetch(news.clone(), || async { Ok(3u32) }).await.unwrap();

        let removed = cache
            .apply(&Mutation::DeleteFleetAppointment { id: "a1".to_string() })
            .await;
        assert_eq!(removed, 2);
        assert_eq!(cache.state(&list_key()).await, QueryState::Idle);
        assert_eq!(cache.state(&news).await, QueryState::Success);

        let refetched: u32 = cache.fetch(list_key(), || async { Ok(10u32) }).await.unwrap();
        assert_eq!(refetched, 10);
    }

    #[tokio::test]
    async fn test_result_invalidated_during_load_is_dropped() {
        let cache = QueryCache::default();

        let value: u32 = cache
            .fetch(list_key(), || async {
                cache
                    .invalidate(&Invalidation::Family(QueryFamily::AllFleetAppointments))
                    .await;
                Ok(7u32)
            })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(cache.state(&list_key()).await, QueryState::Idle);
    }

    #[tokio::test]
    async fn test_generations_increase_across_keys() {
        let cache = QueryCache::default();
        let item = QueryKey::new(QueryFamily::SingleFleetAppointment, "a1");

        let first = cache.mark_loading(&list_key()).await;
        let second = cache.mark_loading(&item).await;
        let third = cache.mark_loading(&list_key()).await;
        assert!(first < second && second < third);

        // la carga de la primera generación ya no puede escribir
        cache.store(&list_key(), first, Value::from(1)).await;
        assert_eq!(cache.state(&list_key()).await, QueryState::Loading);
        cache.store(&list_key(), third, Value::from(3)).await;
        assert_eq!(cache.get::<u32>(&list_key()).await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_stale_entries_are_refetched() {
        let cache = QueryCache::new(QueryCacheConfig {
            max_entries: 10,
            stale_after: Some(Duration::ZERO),
        });

        cache.fetch(list_key(), || async { Ok(1u32) }).await.unwrap();
        let again: u32 = cache.fetch(list_key(), || async { Ok(2u32) }).await.unwrap();
        assert_eq!(again, 2);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = QueryCache::new(QueryCacheConfig {
            max_entries: 2,
            stale_after: None,
        });
        let a = QueryKey::new(QueryFamily::SingleFleetAppointment, "a");
        let b = QueryKey::new(QueryFamily::SingleFleetAppointment, "b");
        let c = QueryKey::new(QueryFamily::SingleFleetAppointment, "c");

        cache.fetch(a.clone(), || async { Ok(1u32) }).await.unwrap();
        cache.fetch(b.clone(), || async { Ok(2u32) }).await.unwrap();
        // tocar `a` para que `b` sea la menos usada
        cache.get::<u32>(&a).await.unwrap();
        cache.fetch(c.clone(), || async { Ok(3u32) }).await.unwrap();

        assert_eq!(cache.size().await, 2);
        assert_eq!(cache.state(&b).await, QueryState::Idle);
        assert_eq!(cache.state(&a).await, QueryState::Success);
        assert_eq!(cache.get_stats().await.entries_evicted, 1);
    }
}
