//! Controller de notificaciones
//!
//! Solo lectura y marcado: la creación ocurre como efecto secundario de
//! otras acciones a través del servicio de notificaciones.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::comun::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::notificacion::Notificacion;
use crate::repositories::notificacion_repository::NotificacionRepository;
use crate::utils::errors::AppError;

pub struct NotificacionController {
    repository: NotificacionRepository,
}

impl NotificacionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificacionRepository::new(pool),
        }
    }

    pub async fn listar(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<Notificacion>, AppError> {
        self.repository.listar(user.perfil_id).await
    }

    pub async fn marcar_leida(
        &self,
        notificacion_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<ApiResponse<()>, AppError> {
        let afectadas = self
            .repository
            .marcar_leida(notificacion_id, user.perfil_id)
            .await?;

        if afectadas == 0 {
            return Err(AppError::NotFound("Notificación no encontrada".to_string()));
        }

        Ok(ApiResponse::message_only("Notificación leída".to_string()))
    }

    pub async fn marcar_todas_leidas(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<ApiResponse<u64>, AppError> {
        let afectadas = self.repository.marcar_todas_leidas(user.perfil_id).await?;

        Ok(ApiResponse::success_with_message(
            afectadas,
            "Notificaciones leídas".to_string(),
        ))
    }

    pub async fn contar_no_leidas(&self, user: &AuthenticatedUser) -> Result<i64, AppError> {
        self.repository.contar_no_leidas(user.perfil_id).await
    }
}
