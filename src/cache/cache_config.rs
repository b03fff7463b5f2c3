//! Configuración de cache
//!
//! Este módulo contiene la configuración para la cache de consultas.

use std::time::Duration;

/// Configuración de la cache de consultas
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// Entradas máximas antes de desalojar la menos usada
    pub max_entries: usize,
    /// `None`: una entrada solo se descarta por invalidación explícita
    pub stale_after: Option<Duration>,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            stale_after: None,
        }
    }
}
