//! Modelo de Invitación
//!
//! Tokens de invitación que arrancan el onboarding de coaches y staff.
//! Un token aceptado no puede reutilizarse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::personal::TipoPersonal;

/// Estado de la invitación - mapea al ENUM invitacion_estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "invitacion_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvitacionEstado {
    Pendiente,
    Aceptada,
    Expirada,
}

/// Invitación - mapea exactamente a la tabla invitaciones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invitacion {
    pub id: Uuid,
    pub email: String,
    pub rol: TipoPersonal,
    pub token: String,
    pub estado: InvitacionEstado,
    pub expira_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invitacion {
    pub fn esta_vencida(&self, ahora: DateTime<Utc>) -> bool {
        ahora > self.expira_at
    }
}
