//! Rutas de solicitudes de clase (lado coach)
//!
//! La aprobación vive bajo /clases/:id/solicitudes, junto al resto de
//! la gestión admin del calendario.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::solicitud_controller::SolicitudController;
use crate::dto::comun::ApiResponse;
use crate::dto::solicitud_dto::CrearSolicitudRequest;
use crate::middleware::auth::{coach_only_middleware, AuthenticatedUser};
use crate::models::solicitud::{Solicitud, SolicitudDetalle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_solicitud_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_solicitud))
        .route("/mis", get(mis_solicitudes))
        .route("/:id", delete(retirar_solicitud))
        .layer(middleware::from_fn(coach_only_middleware))
}

async fn crear_solicitud(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CrearSolicitudRequest>,
) -> Result<Json<ApiResponse<Solicitud>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.solicitar(&user, request).await?))
}

async fn mis_solicitudes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<SolicitudDetalle>>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(ApiResponse::success(
        controller.mis_solicitudes(&user).await?,
    )))
}

async fn retirar_solicitud(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.cancelar(id, &user).await?))
}
