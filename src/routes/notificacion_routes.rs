//! Rutas de notificaciones

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::notificacion_controller::NotificacionController;
use crate::dto::comun::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::notificacion::Notificacion;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notificacion_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar))
        .route("/no-leidas", get(contar_no_leidas))
        .route("/:id/leida", post(marcar_leida))
        .route("/leidas", post(marcar_todas_leidas))
}

async fn listar(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Notificacion>>>, AppError> {
    let controller = NotificacionController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.listar(&user).await?)))
}

async fn contar_no_leidas(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<i64>>, AppError> {
    let controller = NotificacionController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(
        controller.contar_no_leidas(&user).await?,
    )))
}

async fn marcar_leida(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificacionController::new(state.pool.clone());
    Ok(Json(controller.marcar_leida(id, &user).await?))
}

async fn marcar_todas_leidas(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<u64>>, AppError> {
    let controller = NotificacionController::new(state.pool.clone());
    Ok(Json(controller.marcar_todas_leidas(&user).await?))
}
