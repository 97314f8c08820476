//! DTOs del flujo de onboarding
//!
//! Endpoints HTTP de arranque del onboarding, fuera de la capa de
//! acciones autenticadas: la persona invitada todavía no tiene sesión.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::personal::TipoPersonal;

/// POST /api/onboarding/crear-cuenta
#[derive(Debug, Deserialize, Validate)]
pub struct CrearCuentaRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    pub rol: TipoPersonal,

    #[validate(length(min = 1))]
    pub token: String,
}

/// Response de crear-cuenta
#[derive(Debug, Serialize)]
pub struct CrearCuentaResponse {
    pub user_id: Uuid,
    pub personal_id: Uuid,
}

/// POST /api/onboarding/datos-personales
#[derive(Debug, Deserialize, Validate)]
pub struct DatosPersonalesRequest {
    pub personal_id: Uuid,
    pub tipo_personal: TipoPersonal,

    #[validate(length(min = 2, max = 100))]
    pub nombre_completo: String,

    #[validate(length(min = 7, max = 20))]
    pub telefono: Option<String>,

    /// Solo coaches: "spinning", "barre" o "ambas"
    pub disciplina: Option<String>,

    /// Solo staff: puesto que ocupará
    #[validate(length(max = 100))]
    pub puesto: Option<String>,
}

/// POST /api/onboarding/finalizar
#[derive(Debug, Deserialize, Validate)]
pub struct FinalizarRequest {
    pub personal_id: Uuid,
    pub tipo_personal: TipoPersonal,

    /// Firma capturada, codificada en base64 (PNG)
    pub firma_base64: String,

    #[validate(length(min = 1))]
    pub token: String,
}

/// GET /api/onboarding/validar-token
#[derive(Debug, Deserialize)]
pub struct ValidarTokenQuery {
    pub token: String,
}
