//! Modelo de Perfil
//!
//! Este módulo contiene el perfil de autenticación y los roles del sistema.
//! Mapea exactamente a la tabla perfiles del schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Roles del sistema - mapea al ENUM rol_perfil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "rol_perfil", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    Coach,
    Staff,
    Cliente,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Coach => "coach",
            Rol::Staff => "staff",
            Rol::Cliente => "cliente",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Rol::Admin),
            "coach" => Some(Rol::Coach),
            "staff" => Some(Rol::Staff),
            "cliente" => Some(Rol::Cliente),
            _ => None,
        }
    }
}

/// Perfil de autenticación - mapea exactamente a la tabla perfiles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Perfil {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre_completo: String,
    pub rol: Rol,
    pub email_confirmado: bool,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

/// Response de perfil para la API (sin password_hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfilResponse {
    pub id: Uuid,
    pub email: String,
    pub nombre_completo: String,
    pub rol: Rol,
    pub email_confirmado: bool,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Perfil> for PerfilResponse {
    fn from(perfil: Perfil) -> Self {
        Self {
            id: perfil.id,
            email: perfil.email,
            nombre_completo: perfil.nombre_completo,
            rol: perfil.rol,
            email_confirmado: perfil.email_confirmado,
            activo: perfil.activo,
            created_at: perfil.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rol_round_trip() {
        for rol in [Rol::Admin, Rol::Coach, Rol::Staff, Rol::Cliente] {
            assert_eq!(Rol::from_str(rol.as_str()), Some(rol));
        }
    }

    #[test]
    fn test_rol_desconocido() {
        assert_eq!(Rol::from_str("gerente"), None);
    }
}
