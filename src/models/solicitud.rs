//! Modelo de Solicitud de Clase
//!
//! Solicitudes de coaches para que se les asigne una clase sin coach.
//! Se resuelven exactamente una vez por acción de un admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la solicitud - mapea al ENUM solicitud_estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "solicitud_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SolicitudEstado {
    Pendiente,
    Aprobado,
    Rechazado,
}

/// Solicitud - mapea exactamente a la tabla solicitudes_clase
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Solicitud {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub coach_id: Uuid,
    pub mensaje: Option<String>,
    pub estado: SolicitudEstado,
    pub created_at: DateTime<Utc>,
    pub resuelta_at: Option<DateTime<Utc>>,
}

/// Solicitud con el nombre del coach y los datos de la clase, para la
/// vista del admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SolicitudDetalle {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub coach_id: Uuid,
    pub nombre_coach: String,
    pub mensaje: Option<String>,
    pub estado: SolicitudEstado,
    pub fecha_hora_clase: DateTime<Utc>,
    pub nombre_disciplina: String,
    pub created_at: DateTime<Utc>,
}
