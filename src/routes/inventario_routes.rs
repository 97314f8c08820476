//! Rutas de inventario (salones y espacios)
//!
//! Consulta y cambios de estado para el personal del estudio; altas y
//! ediciones estructurales solo para el admin.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::inventario_controller::InventarioController;
use crate::dto::comun::ApiResponse;
use crate::dto::inventario_dto::{
    ActualizarEstadoEspacioRequest, ActualizarSalonRequest, CrearEspacioRequest,
    CrearSalonRequest, EstadisticasSalon,
};
use crate::middleware::auth::{admin_only_middleware, staff_access_middleware};
use crate::models::espacio::Espacio;
use crate::models::salon::Salon;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inventario_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/salones", post(crear_salon))
        .route("/salones/:id", put(actualizar_salon))
        .route("/espacios", post(crear_espacio))
        .layer(middleware::from_fn(admin_only_middleware));

    Router::new()
        .route("/salones", get(listar_salones))
        .route("/salones/:id", get(obtener_salon))
        .route("/salones/:id/espacios", get(listar_espacios))
        .route("/salones/:id/estadisticas", get(estadisticas_salon))
        .route("/espacios/:id/estado", put(actualizar_estado_espacio))
        .route("/espacios/:id/uso", post(registrar_uso_espacio))
        .layer(middleware::from_fn(staff_access_middleware))
        .merge(admin)
}

fn controller(state: &AppState) -> InventarioController {
    InventarioController::new(state.pool.clone(), state.redis.clone())
}

async fn crear_salon(
    State(state): State<AppState>,
    Json(request): Json<CrearSalonRequest>,
) -> Result<Json<ApiResponse<Salon>>, AppError> {
    Ok(Json(controller(&state).crear_salon(request).await?))
}

async fn actualizar_salon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarSalonRequest>,
) -> Result<Json<ApiResponse<Salon>>, AppError> {
    Ok(Json(controller(&state).actualizar_salon(id, request).await?))
}

async fn listar_salones(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Salon>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).listar_salones().await?,
    )))
}

async fn obtener_salon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Salon>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).obtener_salon(id).await?,
    )))
}

async fn crear_espacio(
    State(state): State<AppState>,
    Json(request): Json<CrearEspacioRequest>,
) -> Result<Json<ApiResponse<Espacio>>, AppError> {
    Ok(Json(controller(&state).crear_espacio(request).await?))
}

async fn listar_espacios(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Espacio>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).listar_espacios(id).await?,
    )))
}

async fn actualizar_estado_espacio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarEstadoEspacioRequest>,
) -> Result<Json<ApiResponse<Espacio>>, AppError> {
    Ok(Json(
        controller(&state)
            .actualizar_estado_espacio(id, request)
            .await?,
    ))
}

async fn registrar_uso_espacio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Espacio>>, AppError> {
    Ok(Json(controller(&state).registrar_uso_espacio(id).await?))
}

async fn estadisticas_salon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EstadisticasSalon>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).estadisticas_salon(id).await?,
    )))
}
