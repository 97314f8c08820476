//! Rutas de reservas

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::reserva_controller::ReservaController;
use crate::dto::comun::ApiResponse;
use crate::dto::reserva_dto::{
    CancelarReservaRequest, CrearReservaRequest, ResultadoCancelacion, ResultadoReserva,
    ReservaFiltros,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reserva::ReservaDetalle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reserva_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_reserva))
        .route("/mis", get(mis_reservas))
        .route("/:id/cancelar", post(cancelar_reserva))
}

fn controller(state: &AppState) -> ReservaController {
    ReservaController::new(
        state.pool.clone(),
        state.redis.clone(),
        state.config.ventana_cancelacion_horas,
    )
}

async fn crear_reserva(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CrearReservaRequest>,
) -> Result<Json<ApiResponse<ResultadoReserva>>, AppError> {
    Ok(Json(controller(&state).crear(&user, request).await?))
}

async fn mis_reservas(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filtros): Query<ReservaFiltros>,
) -> Result<Json<ApiResponse<Vec<ReservaDetalle>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).mis_reservas(&user, filtros).await?,
    )))
}

async fn cancelar_reserva(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CancelarReservaRequest>,
) -> Result<Json<ApiResponse<ResultadoCancelacion>>, AppError> {
    Ok(Json(controller(&state).cancelar(id, &user, request).await?))
}
