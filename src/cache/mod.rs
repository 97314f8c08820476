//! Cache y pub/sub
//!
//! Este módulo contiene el cliente Redis usado como cache de lecturas
//! (estadísticas de salones) y como canal de publicación de notificaciones.

pub mod redis_client;

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use redis_client::RedisClient;

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
    pub max_connections: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            default_ttl: 3600, // 1 hora
            max_connections: 10,
        }
    }
}

/// Operaciones de cache
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}
