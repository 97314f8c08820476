//! Rutas de autenticación

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::comun::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::perfil::{Perfil, PerfilResponse};
use crate::repositories::perfil_repository::PerfilRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

/// Rutas públicas (sin sesión)
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas que requieren sesión
pub fn create_auth_protected_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let perfil = PerfilRepository::new(state.pool.clone())
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

    let password_valida = bcrypt::verify(&request.password, &perfil.password_hash)
        .map_err(|e| AppError::Internal(format!("Error verificando password: {}", e)))?;

    if !password_valida {
        return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
    }

    if !perfil.activo {
        return Err(AppError::Unauthorized(
            "Cuenta inactiva o suspendida".to_string(),
        ));
    }

    if !perfil.email_confirmado {
        return Err(AppError::Unauthorized("Email sin confirmar".to_string()));
    }

    let jwt_config = JwtConfig::from(&state.config);
    let access_token = generate_token(perfil.id, perfil.rol.as_str(), &jwt_config)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_expiration,
        perfil: PerfilResponse::from(perfil),
    })))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<PerfilResponse>>, AppError> {
    let perfil = sqlx::query_as::<_, Perfil>("SELECT * FROM perfiles WHERE id = $1")
        .bind(user.perfil_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("Perfil no encontrado".to_string()))?;

    Ok(Json(ApiResponse::success(PerfilResponse::from(perfil))))
}
