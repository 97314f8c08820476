//! Middleware de autenticación JWT
//!
//! Valida el token Bearer, carga el perfil desde la base y lo inyecta
//! como `AuthenticatedUser` en las extensions de la request. Los guards
//! de rol devuelven 403 ante un rol que no corresponde; la sesión es un
//! objeto explícito que recibe cada handler, nunca un lookup ambiental.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::perfil::{Perfil, Rol},
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub perfil_id: Uuid,
    pub rol: Rol,
    pub nombre_completo: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let perfil_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de perfil inválido".to_string()))?;

    // Verificar que el perfil existe y sigue habilitado
    let perfil = sqlx::query_as::<_, Perfil>("SELECT * FROM perfiles WHERE id = $1")
        .bind(perfil_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::Unauthorized("Perfil no encontrado".to_string()))?;

    if !perfil.activo {
        return Err(AppError::Unauthorized("Cuenta inactiva o suspendida".to_string()));
    }

    if !perfil.email_confirmado {
        return Err(AppError::Unauthorized("Email sin confirmar".to_string()));
    }

    let authenticated_user = AuthenticatedUser {
        perfil_id: perfil.id,
        rol: perfil.rol,
        nombre_completo: perfil.nombre_completo,
    };

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Guard: solo administradores
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.rol != Rol::Admin {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Guard: solo coaches
pub async fn coach_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.rol != Rol::Coach {
        return Err(AppError::Forbidden("Se requiere rol de coach".to_string()));
    }

    Ok(next.run(request).await)
}

/// Guard: personal del estudio (admin, coach o staff)
pub async fn staff_access_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.rol == Rol::Cliente {
        return Err(AppError::Forbidden(
            "Acceso reservado al personal del estudio".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
