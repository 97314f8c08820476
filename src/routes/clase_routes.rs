//! Rutas de clases
//!
//! Lectura para cualquier sesión; la gestión del calendario, la
//! asignación de coaches y la aprobación de solicitudes son del admin.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::clase_controller::ClaseController;
use crate::controllers::reserva_controller::ReservaController;
use crate::controllers::solicitud_controller::SolicitudController;
use crate::dto::clase_dto::{
    ActualizarClaseRequest, AsignarCoachRequest, ClaseFiltros, CrearClaseRequest,
};
use crate::dto::comun::ApiResponse;
use crate::dto::solicitud_dto::AprobarSolicitudRequest;
use crate::middleware::auth::{admin_only_middleware, staff_access_middleware, AuthenticatedUser};
use crate::models::clase::{Clase, ClaseDetalle, Disciplina};
use crate::models::reserva::ReservaDetalle;
use crate::models::solicitud::{Solicitud, SolicitudDetalle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_clase_router() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(crear_clase))
        .route("/:id", put(actualizar_clase))
        .route("/:id", delete(eliminar_clase))
        .route("/:id/coach", post(asignar_coach))
        .route("/:id/coach", delete(desasignar_coach))
        .route("/:id/cancelar", post(cancelar_clase))
        .route("/:id/completar", post(completar_clase))
        .route("/:id/solicitudes", get(listar_solicitudes))
        .route("/:id/solicitudes/aprobar", post(aprobar_solicitud))
        .layer(middleware::from_fn(admin_only_middleware));

    let staff = Router::new()
        .route("/:id/reservas", get(reservas_de_clase))
        .layer(middleware::from_fn(staff_access_middleware));

    Router::new()
        .route("/", get(listar_clases))
        .route("/disciplinas", get(listar_disciplinas))
        .route("/:id", get(obtener_clase))
        .merge(admin)
        .merge(staff)
}

async fn crear_clase(
    State(state): State<AppState>,
    Json(request): Json<CrearClaseRequest>,
) -> Result<Json<ApiResponse<Clase>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.crear(request).await?))
}

async fn actualizar_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActualizarClaseRequest>,
) -> Result<Json<ApiResponse<Clase>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.actualizar(id, request).await?))
}

async fn eliminar_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.eliminar(id).await?))
}

async fn asignar_coach(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AsignarCoachRequest>,
) -> Result<Json<ApiResponse<Clase>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(
        controller
            .asignar_coach_directo(id, request.coach_id, user.perfil_id)
            .await?,
    ))
}

async fn desasignar_coach(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Clase>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.desasignar_coach(id).await?))
}

async fn cancelar_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.cancelar(id).await?))
}

async fn completar_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(controller.completar(id).await?))
}

async fn obtener_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClaseDetalle>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(ApiResponse::success(controller.obtener(id).await?)))
}

async fn listar_clases(
    State(state): State<AppState>,
    Query(filtros): Query<ClaseFiltros>,
) -> Result<Json<ApiResponse<Vec<ClaseDetalle>>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(ApiResponse::success(controller.listar(filtros).await?)))
}

async fn listar_disciplinas(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Disciplina>>>, AppError> {
    let controller = ClaseController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(ApiResponse::success(
        controller.listar_disciplinas().await?,
    )))
}

async fn reservas_de_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReservaDetalle>>>, AppError> {
    let controller = ReservaController::new(
        state.pool.clone(),
        state.redis.clone(),
        state.config.ventana_cancelacion_horas,
    );
    Ok(Json(ApiResponse::success(
        controller.listar_por_clase(id).await?,
    )))
}

async fn listar_solicitudes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SolicitudDetalle>>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(ApiResponse::success(
        controller.listar_por_clase(id).await?,
    )))
}

async fn aprobar_solicitud(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AprobarSolicitudRequest>,
) -> Result<Json<ApiResponse<Solicitud>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone(), state.redis.clone());
    Ok(Json(
        controller
            .aprobar(id, request.solicitud_id, user.perfil_id)
            .await?,
    ))
}
