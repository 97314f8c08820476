//! Servicio de notificaciones
//!
//! Inserta la notificación y la publica en el canal Redis del
//! destinatario. Es un efecto secundario fire-and-forget: si el insert
//! o el publish fallan, se loggea y la acción que lo originó sigue su
//! curso — un push perdido se recupera al recargar la vista.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::cache::RedisClient;
use crate::repositories::notificacion_repository::NotificacionRepository;

pub struct NotificacionService {
    repository: NotificacionRepository,
    redis: RedisClient,
}

impl NotificacionService {
    pub fn new(pool: PgPool, redis: RedisClient) -> Self {
        Self {
            repository: NotificacionRepository::new(pool),
            redis,
        }
    }

    /// Enviar una notificación a un destinatario
    pub async fn enviar(
        &self,
        destinatario_id: Uuid,
        tipo: &str,
        titulo: &str,
        mensaje: &str,
        url_accion: Option<String>,
    ) {
        let notificacion = match self
            .repository
            .create(
                destinatario_id,
                tipo.to_string(),
                titulo.to_string(),
                mensaje.to_string(),
                url_accion,
            )
            .await
        {
            Ok(n) => n,
            Err(e) => {
                warn!(
                    "⚠️ No se pudo guardar la notificación '{}' para {}: {}",
                    tipo, destinatario_id, e
                );
                return;
            }
        };

        let canal = self
            .redis
            .canal_notificaciones(&destinatario_id.to_string());
        self.redis.publish(&canal, &notificacion).await;
    }

    /// Enviar la misma notificación a varios destinatarios
    pub async fn enviar_a_varios(
        &self,
        destinatarios: &[Uuid],
        tipo: &str,
        titulo: &str,
        mensaje: &str,
        url_accion: Option<String>,
    ) {
        for destinatario in destinatarios {
            self.enviar(*destinatario, tipo, titulo, mensaje, url_accion.clone())
                .await;
        }
    }
}
