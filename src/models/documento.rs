//! Modelo de Documento de Personal
//!
//! Documentos subidos durante el onboarding. Rechazar un documento lo
//! regresa a pendiente con una nueva versión para re-subirlo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::personal::RevisionEstado;

/// Documento - mapea exactamente a la tabla documentos_personal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Documento {
    pub id: Uuid,
    pub personal_id: Uuid,
    pub tipo_documento: String,
    pub url_archivo: String,
    pub estado: RevisionEstado,
    pub comentarios_admin: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}
