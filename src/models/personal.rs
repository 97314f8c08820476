//! Modelo de Personal
//!
//! Expedientes de coaches y staff, separados del perfil de autenticación.
//! Ciclo de vida: aceptación de invitación → pasos de onboarding →
//! revisión del admin (aprobar activa la cuenta).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de personal - mapea al ENUM tipo_personal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_personal", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoPersonal {
    Coach,
    Staff,
}

impl TipoPersonal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPersonal::Coach => "coach",
            TipoPersonal::Staff => "staff",
        }
    }
}

/// Estado de revisión - mapea al ENUM revision_estado
///
/// Compartido por personal y documentos: pendiente hasta que el admin
/// decide, y la decisión siempre notifica al interesado.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "revision_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RevisionEstado {
    Pendiente,
    Aprobado,
    Rechazado,
}

/// Personal - mapea exactamente a la tabla personal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Personal {
    pub id: Uuid,
    pub perfil_id: Option<Uuid>,
    pub tipo: TipoPersonal,
    pub nombre_completo: String,
    pub email: String,
    pub telefono: Option<String>,
    pub estado: RevisionEstado,
    pub activo: bool,
    pub onboarding_completo: bool,
    pub documentos_completos: bool,
    pub contrato_firmado_at: Option<DateTime<Utc>>,
    pub es_head_coach: bool,
    /// Disciplina del coach: "spinning", "barre" o "ambas"
    pub disciplina: Option<String>,
    /// Puesto del staff (recepción, limpieza, etc.)
    pub puesto: Option<String>,
    pub created_at: DateTime<Utc>,
}
