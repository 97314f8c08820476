//! Cliente Redis
//!
//! Cache de lecturas y canal pub/sub de notificaciones en tiempo real.
//! Los clientes suscritos al canal de su perfil reciben cada notificación
//! insertada; la entrega es best-effort y un push perdido se recupera
//! re-consultando al cargar la vista.

use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use super::{CacheConfig, CacheOperations};

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("studio:{}:{}", prefix, identifier)
    }

    /// Clave de cache de estadísticas de salón
    pub fn estadisticas_salon_key(&self, salon_id: &str) -> String {
        self.make_key("estadisticas_salon", salon_id)
    }

    /// Canal de notificaciones de un destinatario
    pub fn canal_notificaciones(&self, destinatario_id: &str) -> String {
        self.make_key("notificaciones", destinatario_id)
    }

    /// TTL por defecto del cache
    pub fn default_ttl(&self) -> u64 {
        self.config.default_ttl
    }

    /// Publicar un mensaje en un canal (fire-and-forget)
    ///
    /// Un fallo de publicación se loggea y no se propaga: la acción que
    /// generó la notificación nunca debe fallar por un push perdido.
    pub async fn publish<T: Serialize + Send + Sync>(&self, channel: &str, payload: &T) {
        let mut conn = self.manager.clone();

        let serialized = match serde_json::to_string(payload) {
            Ok(s) => s,
            Err(e) => {
                error!("❌ Error serializando payload para canal {}: {}", channel, e);
                return;
            }
        };

        let result: RedisResult<i64> = conn.publish(channel, serialized).await;
        match result {
            Ok(receivers) => {
                debug!("📣 Publicado en canal {} ({} suscriptores)", channel, receivers);
            }
            Err(e) => {
                warn!("⚠️ Error publicando en canal {}: {}", channel, e);
            }
        }
    }
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                let deserialized: T = serde_json::from_str(&value)?;
                Ok(Some(deserialized))
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();

        let serialized = serde_json::to_string(value)?;

        let result: RedisResult<()> = conn.set_ex(key, serialized, ttl).await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();

        let result: RedisResult<i64> = conn.del(key).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando cache para clave {}: {}", key, e);
                Ok(()) // No fallar si no se puede eliminar
            }
        }
    }
}
