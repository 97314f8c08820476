//! Modelo de Notificación
//!
//! Notificaciones internas creadas como efecto secundario de otras
//! acciones. El dueño es el destinatario; la entrega en tiempo real
//! vía Redis es best-effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Notificación - mapea exactamente a la tabla notificaciones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notificacion {
    pub id: Uuid,
    pub destinatario_id: Uuid,
    pub tipo: String,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    pub url_accion: Option<String>,
    pub created_at: DateTime<Utc>,
}
