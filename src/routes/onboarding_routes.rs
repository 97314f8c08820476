//! Rutas públicas de onboarding
//!
//! No pasan por el middleware de autenticación: el token de invitación
//! es la credencial de la persona invitada.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::onboarding_controller::OnboardingController;
use crate::dto::comun::ApiResponse;
use crate::dto::onboarding_dto::{
    CrearCuentaRequest, CrearCuentaResponse, DatosPersonalesRequest, FinalizarRequest,
    ValidarTokenQuery,
};
use crate::dto::personal_dto::SubirDocumentoRequest;
use crate::models::documento::Documento;
use crate::models::invitacion::Invitacion;
use crate::models::personal::Personal;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_onboarding_router() -> Router<AppState> {
    Router::new()
        .route("/validar-token", get(validar_token))
        .route("/crear-cuenta", post(crear_cuenta))
        .route("/datos-personales", post(datos_personales))
        .route("/:personal_id/documentos", post(subir_documento))
        .route("/finalizar", post(finalizar))
}

fn controller(state: &AppState) -> OnboardingController {
    OnboardingController::new(state.pool.clone(), &state.config)
}

async fn validar_token(
    State(state): State<AppState>,
    Query(query): Query<ValidarTokenQuery>,
) -> Result<Json<ApiResponse<Invitacion>>, AppError> {
    Ok(Json(ApiResponse::success(
        controller(&state).validar_token(&query.token).await?,
    )))
}

async fn crear_cuenta(
    State(state): State<AppState>,
    Json(request): Json<CrearCuentaRequest>,
) -> Result<Json<ApiResponse<CrearCuentaResponse>>, AppError> {
    Ok(Json(controller(&state).crear_cuenta(request).await?))
}

async fn datos_personales(
    State(state): State<AppState>,
    Json(request): Json<DatosPersonalesRequest>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(controller(&state).datos_personales(request).await?))
}

async fn subir_documento(
    State(state): State<AppState>,
    Path(personal_id): Path<Uuid>,
    Json(request): Json<SubirDocumentoRequest>,
) -> Result<Json<ApiResponse<Documento>>, AppError> {
    Ok(Json(
        controller(&state).subir_documento(personal_id, request).await?,
    ))
}

async fn finalizar(
    State(state): State<AppState>,
    Json(request): Json<FinalizarRequest>,
) -> Result<Json<ApiResponse<Personal>>, AppError> {
    Ok(Json(controller(&state).finalizar(request).await?))
}
