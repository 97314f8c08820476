//! Controller de personal (lado admin)
//!
//! Invitaciones, revisión de expedientes y documentos, y designación de
//! head coach. Toda decisión de revisión notifica al interesado.

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::RedisClient;
use crate::config::environment::EnvironmentConfig;
use crate::dto::comun::ApiResponse;
use crate::dto::personal_dto::{
    CrearInvitacionRequest, DesignarHeadCoachRequest, RechazarDocumentoRequest,
    RechazarPersonalRequest,
};
use crate::models::documento::Documento;
use crate::models::invitacion::Invitacion;
use crate::models::personal::{Personal, RevisionEstado, TipoPersonal};
use crate::repositories::documento_repository::DocumentoRepository;
use crate::repositories::invitacion_repository::InvitacionRepository;
use crate::repositories::perfil_repository::PerfilRepository;
use crate::repositories::personal_repository::PersonalRepository;
use crate::services::notificacion_service::NotificacionService;
use crate::utils::errors::AppError;

const TOKEN_INVITACION_LEN: usize = 32;

pub struct PersonalController {
    repository: PersonalRepository,
    invitaciones: InvitacionRepository,
    documentos: DocumentoRepository,
    perfiles: PerfilRepository,
    notificaciones: NotificacionService,
    invitacion_vigencia_horas: i64,
}

impl PersonalController {
    pub fn new(pool: PgPool, redis: RedisClient, config: &EnvironmentConfig) -> Self {
        Self {
            repository: PersonalRepository::new(pool.clone()),
            invitaciones: InvitacionRepository::new(pool.clone()),
            documentos: DocumentoRepository::new(pool.clone()),
            perfiles: PerfilRepository::new(pool.clone()),
            notificaciones: NotificacionService::new(pool, redis),
            invitacion_vigencia_horas: config.invitacion_vigencia_horas,
        }
    }

    pub async fn crear_invitacion(
        &self,
        request: CrearInvitacionRequest,
    ) -> Result<ApiResponse<Invitacion>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_INVITACION_LEN)
            .map(char::from)
            .collect();

        let expira_at = Utc::now() + Duration::hours(self.invitacion_vigencia_horas);

        let invitacion = self
            .invitaciones
            .create(request.email, request.rol, token, expira_at)
            .await?;

        Ok(ApiResponse::success_with_message(
            invitacion,
            "Invitación creada".to_string(),
        ))
    }

    pub async fn listar_invitaciones(&self) -> Result<Vec<Invitacion>, AppError> {
        self.invitaciones.listar().await
    }

    pub async fn listar_personal(
        &self,
        tipo: Option<TipoPersonal>,
        estado: Option<RevisionEstado>,
    ) -> Result<Vec<Personal>, AppError> {
        self.repository.listar(tipo, estado).await
    }

    pub async fn obtener_personal(&self, personal_id: Uuid) -> Result<Personal, AppError> {
        self.repository
            .find_by_id(personal_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))
    }

    pub async fn listar_documentos(
        &self,
        personal_id: Uuid,
    ) -> Result<Vec<Documento>, AppError> {
        self.obtener_personal(personal_id).await?;
        self.documentos.listar_por_personal(personal_id).await
    }

    /// Aprobación final del expediente: requiere todos los documentos
    /// aprobados y activa el perfil de acceso.
    pub async fn aprobar_personal(
        &self,
        personal_id: Uuid,
    ) -> Result<ApiResponse<Personal>, AppError> {
        let personal = self.obtener_personal(personal_id).await?;

        if personal.estado == RevisionEstado::Aprobado {
            return Err(AppError::Conflict("El expediente ya fue aprobado".to_string()));
        }

        if !personal.onboarding_completo {
            return Err(AppError::Conflict(
                "El onboarding aún no está completo".to_string(),
            ));
        }

        if !self.documentos.todos_aprobados(personal_id).await? {
            return Err(AppError::Conflict(
                "Hay documentos pendientes o rechazados en el expediente".to_string(),
            ));
        }

        let personal = self.repository.aprobar(personal_id).await?;

        if let Some(perfil_id) = personal.perfil_id {
            self.perfiles.activar(perfil_id).await?;
            self.notificaciones
                .enviar(
                    perfil_id,
                    "personal_aprobado",
                    "Bienvenido al equipo",
                    "Tu expediente fue aprobado; tu cuenta ya está activa.",
                    None,
                )
                .await;
        }

        Ok(ApiResponse::success_with_message(
            personal,
            "Personal aprobado".to_string(),
        ))
    }

    pub async fn rechazar_personal(
        &self,
        personal_id: Uuid,
        request: RechazarPersonalRequest,
    ) -> Result<ApiResponse<Personal>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let personal = self.obtener_personal(personal_id).await?;

        if personal.estado == RevisionEstado::Rechazado {
            return Err(AppError::Conflict("El expediente ya fue rechazado".to_string()));
        }

        let personal = self.repository.rechazar(personal_id).await?;

        if let Some(perfil_id) = personal.perfil_id {
            self.perfiles.desactivar(perfil_id).await?;
            self.notificaciones
                .enviar(
                    perfil_id,
                    "personal_rechazado",
                    "Expediente rechazado",
                    &format!("Tu expediente fue rechazado: {}", request.motivo),
                    None,
                )
                .await;
        }

        Ok(ApiResponse::success_with_message(
            personal,
            "Personal rechazado".to_string(),
        ))
    }

    pub async fn aprobar_documento(
        &self,
        documento_id: Uuid,
    ) -> Result<ApiResponse<Documento>, AppError> {
        let documento = self
            .documentos
            .find_by_id(documento_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))?;

        if documento.estado == RevisionEstado::Aprobado {
            return Err(AppError::Conflict("El documento ya fue aprobado".to_string()));
        }

        let documento = self.documentos.aprobar(documento_id).await?;

        // El expediente queda completo cuando la última versión de cada
        // tipo está aprobada
        let completos = self.documentos.todos_aprobados(documento.personal_id).await?;
        self.repository
            .marcar_documentos_completos(documento.personal_id, completos)
            .await?;

        self.notificar_personal(
            documento.personal_id,
            "documento_aprobado",
            "Documento aprobado",
            &format!("Tu documento '{}' fue aprobado.", documento.tipo_documento),
        )
        .await;

        Ok(ApiResponse::success_with_message(
            documento,
            "Documento aprobado".to_string(),
        ))
    }

    pub async fn rechazar_documento(
        &self,
        documento_id: Uuid,
        request: RechazarDocumentoRequest,
    ) -> Result<ApiResponse<Documento>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.documentos
            .find_by_id(documento_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento no encontrado".to_string()))?;

        let documento = self
            .documentos
            .rechazar(documento_id, request.comentario.clone())
            .await?;

        self.repository
            .marcar_documentos_completos(documento.personal_id, false)
            .await?;

        self.notificar_personal(
            documento.personal_id,
            "documento_rechazado",
            "Documento rechazado",
            &format!(
                "Tu documento '{}' fue rechazado: {}. Súbelo de nuevo.",
                documento.tipo_documento, request.comentario
            ),
        )
        .await;

        Ok(ApiResponse::success_with_message(
            documento,
            "Documento rechazado".to_string(),
        ))
    }

    pub async fn designar_head_coach(
        &self,
        personal_id: Uuid,
        request: DesignarHeadCoachRequest,
    ) -> Result<ApiResponse<Personal>, AppError> {
        let personal = self.obtener_personal(personal_id).await?;

        if personal.tipo != TipoPersonal::Coach {
            return Err(AppError::Validation(
                "Solo un coach puede ser head coach".to_string(),
            ));
        }

        if request.es_head_coach && personal.estado != RevisionEstado::Aprobado {
            return Err(AppError::Conflict(
                "El coach debe estar aprobado".to_string(),
            ));
        }

        let disciplina = if request.es_head_coach {
            match (&personal.disciplina, &request.disciplina) {
                // Con disciplina "ambas" hay que elegir una concreta
                (Some(d), None) if d == "ambas" => {
                    return Err(AppError::Validation(
                        "El coach imparte ambas disciplinas; indica cuál encabezará"
                            .to_string(),
                    ));
                }
                (_, Some(elegida)) => {
                    if elegida != "spinning" && elegida != "barre" {
                        return Err(AppError::Validation(
                            "Disciplina inválida: usa 'spinning' o 'barre'".to_string(),
                        ));
                    }
                    Some(elegida.clone())
                }
                _ => None,
            }
        } else {
            None
        };

        let personal = self
            .repository
            .designar_head_coach(personal_id, request.es_head_coach, disciplina)
            .await?;

        let mensaje = if personal.es_head_coach {
            "Ahora eres head coach de tu disciplina."
        } else {
            "Dejaste de ser head coach."
        };
        self.notificar_personal(personal.id, "head_coach", "Head coach", mensaje)
            .await;

        Ok(ApiResponse::success_with_message(
            personal,
            "Designación actualizada".to_string(),
        ))
    }

    /// Notifica al perfil ligado al expediente, si existe
    async fn notificar_personal(&self, personal_id: Uuid, tipo: &str, titulo: &str, mensaje: &str) {
        if let Ok(Some(personal)) = self.repository.find_by_id(personal_id).await {
            if let Some(perfil_id) = personal.perfil_id {
                self.notificaciones
                    .enviar(perfil_id, tipo, titulo, mensaje, None)
                    .await;
            }
        }
    }
}
