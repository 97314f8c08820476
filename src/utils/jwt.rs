//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para generar y verificar
//! los tokens de sesión del estudio.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Claims del token de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // perfil_id
    pub rol: String, // rol del perfil
    pub exp: usize,  // expiration timestamp
    pub iat: usize,  // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar token de sesión para un perfil
pub fn generate_token(perfil_id: Uuid, rol: &str, config: &JwtConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: perfil_id.to_string(),
        rol: rol.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar token de sesión
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Unauthorized(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string())
        })?;

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token vacío".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "clave-de-prueba-no-usar-en-produccion".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_generar_y_verificar_token() {
        let config = test_config();
        let perfil_id = Uuid::new_v4();

        let token = generate_token(perfil_id, "coach", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, perfil_id.to_string());
        assert_eq!(claims.rol, "coach");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_con_secreto_distinto_falla() {
        let config = test_config();
        let otra = JwtConfig {
            secret: "otro-secreto".to_string(),
            expiration: 3600,
        };

        let token = generate_token(Uuid::new_v4(), "admin", &config).unwrap();
        assert!(verify_token(&token, &otra).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
