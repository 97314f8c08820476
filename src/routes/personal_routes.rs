//! Rutas de personal (solo admin)

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::personal_controller::PersonalController;
use crate::dto::comun::ApiResponse;
use crate::dto::personal_dto::{
    CrearInvitacionRequest, DesignarHeadCoachRequest, PersonalFiltros,
    RechazarDocumentoRequest, RechazarPersonalRequest,
};
use crate::middleware::auth::admin_only_middleware;
use crate::models::documento::Documento;
use crate::models::invitacion::Invitacion;
use crate::models::personal::Personal;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_personal_router() -> Router<AppState> {
    Router::new()
        .route("/invitaciones", post(crear_invitacion))
        .route("/invitaciones", get(listar_invitaciones))
        .route("/", get(listar_personal))
        .route("/:id", get(obtener_personal))
        .route("/:id/documentos", get(listar_documentos))
        .route("/:id/aprobar", post(aprobar_personal))
        .route("/:id/rechazar", post(rechazar_personal))
        .route("/:id/head-coach", post(designar_head_coach))
        .route("/documentos/:id/aprobar", post(aprobar_documento))
        .route("/documentos/:id/rechazar", post(rechazar_documento))
        .layer(middleware::from_fn(admin_only_middleware))
}

fn controller(state: &AppState) -> PersonalController {
    PersonalController::new(state.pool.clone(), state.redis.clone(), &state.config)
}

async fn crear_invitacion(
    State(state): State<AppState>,
    Json(request): Json<CrearInvitacionRequest>,
) -> Result<Json<ApiResponse<Invitacion>>, AppError> {
    Ok(Json(controller(&state).crear_invitacion(request).await?))
}

async fn listar_invitaciones(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Invitacion>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).listar_invitaciones().await?,
    )))
}

async fn listar_personal(
    State(state): State<AppState>,
    Query(filtros): Query<PersonalFiltros>,
) -> Result<Json<ApiResponse<Vec<Personal>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state)
            .listar_personal(filtros.tipo, filtros.estado)
            .await?,
    )))
}

async fn obtener_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).obtener_personal(id).await?,
    )))
}

async fn listar_documentos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Documento>>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).listar_documentos(id).await?,
    )))
}

async fn aprobar_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(controller(&state).aprobar_personal(id).await?))
}

async fn rechazar_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RechazarPersonalRequest>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(controller(&state).rechazar_personal(id, request).await?))
}

async fn designar_head_coach(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DesignarHeadCoachRequest>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(
        controller(&state).designar_head_coach(id, request).await?,
    ))
}

async fn aprobar_documento(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Documento>>, AppError> {
    Ok(Json(controller(&state).aprobar_documento(id).await?))
}

async fn rechazar_documento(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RechazarDocumentoRequest>,
) -> Result<Json<ApiResponse<Documento>>, AppError> {
    Ok(Json(
        controller(&state).rechazar_documento(id, request).await?,
    ))
}
