//! Controller del flujo de onboarding
//!
//! Endpoints públicos: la persona invitada todavía no tiene sesión, el
//! token de invitación es su credencial. El perfil queda inactivo hasta
//! que el admin aprueba el expediente.

use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::comun::ApiResponse;
use crate::dto::onboarding_dto::{
    CrearCuentaRequest, CrearCuentaResponse, DatosPersonalesRequest, FinalizarRequest,
};
use crate::dto::personal_dto::SubirDocumentoRequest;
use crate::models::documento::Documento;
use crate::models::invitacion::{Invitacion, InvitacionEstado};
use crate::models::perfil::Rol;
use crate::models::personal::{Personal, TipoPersonal};
use crate::repositories::documento_repository::DocumentoRepository;
use crate::repositories::invitacion_repository::InvitacionRepository;
use crate::repositories::perfil_repository::PerfilRepository;
use crate::repositories::personal_repository::PersonalRepository;
use crate::services::almacenamiento_service::AlmacenamientoService;
use crate::utils::errors::AppError;

const DISCIPLINAS_VALIDAS: [&str; 3] = ["spinning", "barre", "ambas"];

pub struct OnboardingController {
    invitaciones: InvitacionRepository,
    perfiles: PerfilRepository,
    personal: PersonalRepository,
    documentos: DocumentoRepository,
    almacenamiento: AlmacenamientoService,
}

impl OnboardingController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            invitaciones: InvitacionRepository::new(pool.clone()),
            perfiles: PerfilRepository::new(pool.clone()),
            personal: PersonalRepository::new(pool.clone()),
            documentos: DocumentoRepository::new(pool),
            almacenamiento: AlmacenamientoService::new(config),
        }
    }

    /// Resuelve el token y verifica que siga siendo utilizable.
    async fn invitacion_vigente(&self, token: &str) -> Result<Invitacion, AppError> {
        let invitacion = self
            .invitaciones
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Invitación no encontrada".to_string()))?;

        match invitacion.estado {
            InvitacionEstado::Aceptada => {
                return Err(AppError::Conflict(
                    "El onboarding de esta invitación ya fue completado".to_string(),
                ));
            }
            InvitacionEstado::Expirada => {
                return Err(AppError::Conflict("La invitación expiró".to_string()));
            }
            InvitacionEstado::Pendiente => {}
        }

        if invitacion.esta_vencida(Utc::now()) {
            self.invitaciones.marcar_expirada(invitacion.id).await?;
            return Err(AppError::Conflict("La invitación expiró".to_string()));
        }

        Ok(invitacion)
    }

    pub async fn validar_token(&self, token: &str) -> Result<Invitacion, AppError> {
        self.invitacion_vigente(token).await
    }

    pub async fn crear_cuenta(
        &self,
        request: CrearCuentaRequest,
    ) -> Result<ApiResponse<CrearCuentaResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let invitacion = self.invitacion_vigente(&request.token).await?;

        if invitacion.email != request.email {
            return Err(AppError::Validation(
                "El email no coincide con la invitación".to_string(),
            ));
        }

        if invitacion.rol != request.rol {
            return Err(AppError::Validation(
                "El rol no coincide con la invitación".to_string(),
            ));
        }

        if self.perfiles.email_existe(&request.email).await? {
            return Err(AppError::Conflict(
                "Ya existe una cuenta con ese email".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error generando hash: {}", e)))?;

        let rol = match request.rol {
            TipoPersonal::Coach => Rol::Coach,
            TipoPersonal::Staff => Rol::Staff,
        };

        // El nombre llega en el paso de datos personales
        let perfil = self
            .perfiles
            .create(request.email.clone(), password_hash, String::new(), rol)
            .await?;

        let personal = self
            .personal
            .create(perfil.id, request.rol, request.email)
            .await?;

        Ok(ApiResponse::success_with_message(
            CrearCuentaResponse {
                user_id: perfil.id,
                personal_id: personal.id,
            },
            "Cuenta creada; continúa con tus datos personales".to_string(),
        ))
    }

    pub async fn datos_personales(
        &self,
        request: DatosPersonalesRequest,
    ) -> Result<ApiResponse<Personal>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existente = self
            .personal
            .find_by_id(request.personal_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        if existente.tipo != request.tipo_personal {
            return Err(AppError::Validation(
                "El tipo de personal no coincide".to_string(),
            ));
        }

        let (disciplina, puesto) = match request.tipo_personal {
            TipoPersonal::Coach => {
                let disciplina = request.disciplina.ok_or_else(|| {
                    AppError::Validation("La disciplina es obligatoria para coaches".to_string())
                })?;
                if !DISCIPLINAS_VALIDAS.contains(&disciplina.as_str()) {
                    return Err(AppError::Validation(
                        "Disciplina inválida: usa 'spinning', 'barre' o 'ambas'".to_string(),
                    ));
                }
                (Some(disciplina), None)
            }
            TipoPersonal::Staff => {
                let puesto = request.puesto.ok_or_else(|| {
                    AppError::Validation("El puesto es obligatorio para staff".to_string())
                })?;
                (None, Some(puesto))
            }
        };

        let personal = self
            .personal
            .guardar_datos_personales(
                request.personal_id,
                request.nombre_completo,
                request.telefono,
                disciplina,
                puesto,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            personal,
            "Datos personales guardados".to_string(),
        ))
    }

    /// Subida (o re-subida tras un rechazo) de un documento del expediente
    pub async fn subir_documento(
        &self,
        personal_id: Uuid,
        request: SubirDocumentoRequest,
    ) -> Result<ApiResponse<Documento>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.personal
            .find_by_id(personal_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        let url = self
            .almacenamiento
            .guardar_base64("documentos", &request.nombre_archivo, &request.archivo_base64)
            .await?;

        let documento = self
            .documentos
            .create(personal_id, request.tipo_documento, url)
            .await?;

        Ok(ApiResponse::success_with_message(
            documento,
            "Documento subido; quedará en revisión".to_string(),
        ))
    }

    /// Cierre del onboarding: firma, expediente a revisión y token consumido.
    pub async fn finalizar(
        &self,
        request: FinalizarRequest,
    ) -> Result<ApiResponse<Personal>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let invitacion = self.invitacion_vigente(&request.token).await?;

        let personal = self
            .personal
            .find_by_id(request.personal_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Personal no encontrado".to_string()))?;

        if personal.tipo != request.tipo_personal {
            return Err(AppError::Validation(
                "El tipo de personal no coincide".to_string(),
            ));
        }

        if personal.onboarding_completo {
            return Err(AppError::Conflict(
                "El onboarding ya fue completado".to_string(),
            ));
        }

        let url_firma = self
            .almacenamiento
            .guardar_firma(personal.id, &request.firma_base64)
            .await?;

        self.documentos
            .create(personal.id, "contrato_firmado".to_string(), url_firma)
            .await?;

        let personal = self
            .personal
            .finalizar_onboarding(personal.id, Utc::now())
            .await?;

        // Condicional a pendiente: un token no se consume dos veces
        let consumido = self.invitaciones.marcar_aceptada(invitacion.id).await?;
        if consumido == 0 {
            return Err(AppError::Conflict(
                "El onboarding de esta invitación ya fue completado".to_string(),
            ));
        }

        Ok(ApiResponse::success_with_message(
            personal,
            "Onboarding completado; tu expediente quedó en revisión".to_string(),
        ))
    }
}
