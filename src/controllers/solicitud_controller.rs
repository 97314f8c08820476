//! Controller de solicitudes de clase
//!
//! Un coach pide una clase sin asignar; el admin aprueba exactamente
//! una solicitud, lo que asigna al coach y rechaza al resto de
//! solicitantes pendientes de esa clase (con aviso a todos).

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::RedisClient;
use crate::dto::comun::ApiResponse;
use crate::dto::solicitud_dto::CrearSolicitudRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::clase::ClaseEstado;
use crate::models::solicitud::{Solicitud, SolicitudDetalle, SolicitudEstado};
use crate::repositories::clase_repository::ClaseRepository;
use crate::repositories::solicitud_repository::SolicitudRepository;
use crate::services::notificacion_service::NotificacionService;
use crate::utils::errors::AppError;

pub struct SolicitudController {
    repository: SolicitudRepository,
    clases: ClaseRepository,
    notificaciones: NotificacionService,
}

impl SolicitudController {
    pub fn new(pool: PgPool, redis: RedisClient) -> Self {
        Self {
            repository: SolicitudRepository::new(pool.clone()),
            clases: ClaseRepository::new(pool.clone()),
            notificaciones: NotificacionService::new(pool, redis),
        }
    }

    pub async fn solicitar(
        &self,
        user: &AuthenticatedUser,
        request: CrearSolicitudRequest,
    ) -> Result<ApiResponse<Solicitud>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let clase = self
            .clases
            .find_by_id(request.clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if clase.coach_id.is_some() {
            return Err(AppError::Conflict("La clase ya tiene coach asignado".to_string()));
        }

        if clase.estado != ClaseEstado::Programada {
            return Err(AppError::Conflict(
                "Solo se puede solicitar una clase programada".to_string(),
            ));
        }

        if self
            .repository
            .pendiente_existente(clase.id, user.perfil_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya tienes una solicitud pendiente para esta clase".to_string(),
            ));
        }

        let solicitud = self
            .repository
            .create(clase.id, user.perfil_id, request.mensaje)
            .await?;

        Ok(ApiResponse::success_with_message(
            solicitud,
            "Solicitud enviada".to_string(),
        ))
    }

    pub async fn cancelar(
        &self,
        solicitud_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ApiResponse<()>, AppError> {
        let solicitud = self
            .repository
            .find_by_id(solicitud_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Solicitud no encontrada".to_string()))?;

        if solicitud.coach_id != user.perfil_id {
            return Err(AppError::Forbidden(
                "No puedes retirar una solicitud ajena".to_string(),
            ));
        }

        if solicitud.estado != SolicitudEstado::Pendiente {
            return Err(AppError::Conflict(
                "La solicitud ya fue resuelta".to_string(),
            ));
        }

        let afectadas = self
            .repository
            .cancelar(solicitud_id, user.perfil_id)
            .await?;
        if afectadas == 0 {
            return Err(AppError::Conflict("La solicitud ya fue resuelta".to_string()));
        }

        Ok(ApiResponse::message_only("Solicitud retirada".to_string()))
    }

    /// Aprobación del admin: asigna coach y rechaza al resto
    pub async fn aprobar(
        &self,
        clase_id: Uuid,
        solicitud_id: Uuid,
        admin_id: Uuid,
    ) -> Result<ApiResponse<Solicitud>, AppError> {
        let solicitud = self
            .repository
            .find_by_id(solicitud_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Solicitud no encontrada".to_string()))?;

        if solicitud.clase_id != clase_id {
            return Err(AppError::Validation(
                "La solicitud no corresponde a esta clase".to_string(),
            ));
        }

        let resultado = self
            .repository
            .aprobar(clase_id, solicitud_id, admin_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "La solicitud ya fue resuelta o la clase ya tiene coach".to_string(),
                )
            })?;

        let (aprobada, rechazados) = resultado;

        self.notificaciones
            .enviar(
                aprobada.coach_id,
                "solicitud_aprobada",
                "Solicitud aprobada",
                "Tu solicitud fue aprobada: la clase es tuya.",
                Some(format!("/coach/clases/{}", clase_id)),
            )
            .await;

        self.notificaciones
            .enviar_a_varios(
                &rechazados,
                "solicitud_rechazada",
                "Solicitud no aprobada",
                "La clase que solicitaste fue asignada a otro coach.",
                Some("/coach/clases-disponibles".to_string()),
            )
            .await;

        Ok(ApiResponse::success_with_message(
            aprobada,
            "Coach asignado a partir de la solicitud".to_string(),
        ))
    }

    pub async fn listar_por_clase(
        &self,
        clase_id: Uuid,
    ) -> Result<Vec<SolicitudDetalle>, AppError> {
        self.clases
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        self.repository.listar_por_clase(clase_id).await
    }

    pub async fn mis_solicitudes(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<SolicitudDetalle>, AppError> {
        self.repository.listar_por_coach(user.perfil_id).await
    }
}
