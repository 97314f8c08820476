//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::perfil::PerfilResponse;

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Response de login exitoso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub perfil: PerfilResponse,
}
