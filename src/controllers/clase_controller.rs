//! Controller de clases
//!
//! Reglas de negocio del ciclo de vida de una clase: creación y edición
//! validadas, asignación directa de coach, cancelación con aviso a los
//! clientes y borrado protegido por las reservas existentes.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::RedisClient;
use crate::dto::clase_dto::{ActualizarClaseRequest, ClaseFiltros, CrearClaseRequest};
use crate::dto::comun::ApiResponse;
use crate::models::clase::{Clase, ClaseDetalle, ClaseEstado, Disciplina};
use crate::models::perfil::Rol;
use crate::repositories::clase_repository::ClaseRepository;
use crate::repositories::espacio_repository::EspacioRepository;
use crate::repositories::perfil_repository::PerfilRepository;
use crate::repositories::reserva_repository::ReservaRepository;
use crate::repositories::salon_repository::SalonRepository;
use crate::services::notificacion_service::NotificacionService;
use crate::utils::errors::AppError;
use crate::utils::validation::{validar_fecha_futura, validar_positivo};

pub struct ClaseController {
    repository: ClaseRepository,
    salones: SalonRepository,
    perfiles: PerfilRepository,
    reservas: ReservaRepository,
    espacios: EspacioRepository,
    notificaciones: NotificacionService,
}

impl ClaseController {
    pub fn new(pool: PgPool, redis: RedisClient) -> Self {
        Self {
            repository: ClaseRepository::new(pool.clone()),
            salones: SalonRepository::new(pool.clone()),
            perfiles: PerfilRepository::new(pool.clone()),
            reservas: ReservaRepository::new(pool.clone()),
            espacios: EspacioRepository::new(pool.clone()),
            notificaciones: NotificacionService::new(pool, redis),
        }
    }

    pub async fn crear(
        &self,
        request: CrearClaseRequest,
    ) -> Result<ApiResponse<Clase>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        validar_positivo(request.capacidad, "capacidad")?;
        validar_positivo(request.duracion, "duracion")?;
        validar_fecha_futura(request.fecha_hora, Utc::now())?;

        let salon = self
            .salones
            .find_by_id(request.salon_id)
            .await?
            .ok_or_else(|| AppError::Validation("El salón no existe".to_string()))?;
        if !salon.activo {
            return Err(AppError::Validation("El salón está inactivo".to_string()));
        }

        let disciplina = self
            .repository
            .find_disciplina(request.disciplina_id)
            .await?
            .ok_or_else(|| AppError::Validation("La disciplina no existe".to_string()))?;
        if !disciplina.activo {
            return Err(AppError::Validation("La disciplina está inactiva".to_string()));
        }

        let clase = self
            .repository
            .create(
                request.nombre_clase,
                request.descripcion,
                request.fecha_hora,
                request.duracion,
                request.salon_id,
                request.disciplina_id,
                request.especialidad_id,
                request.capacidad,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            clase,
            "Clase creada exitosamente".to_string(),
        ))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        request: ActualizarClaseRequest,
    ) -> Result<ApiResponse<Clase>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let actual = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if actual.estado != ClaseEstado::Programada {
            return Err(AppError::Conflict(
                "Solo una clase programada puede editarse".to_string(),
            ));
        }

        let fecha_hora = request.fecha_hora.unwrap_or(actual.fecha_hora);
        let duracion = request.duracion.unwrap_or(actual.duracion);
        let salon_id = request.salon_id.unwrap_or(actual.salon_id);
        let disciplina_id = request.disciplina_id.unwrap_or(actual.disciplina_id);
        let capacidad = request.capacidad.unwrap_or(actual.capacidad);

        validar_positivo(capacidad, "capacidad")?;
        validar_positivo(duracion, "duracion")?;
        validar_fecha_futura(fecha_hora, Utc::now())?;

        // El cupo no puede encogerse por debajo de las reservas ya tomadas
        if capacidad < actual.reservas_count {
            return Err(AppError::Validation(format!(
                "La capacidad ({}) no puede ser menor que las reservas existentes ({})",
                capacidad, actual.reservas_count
            )));
        }

        if salon_id != actual.salon_id {
            self.salones
                .find_by_id(salon_id)
                .await?
                .filter(|s| s.activo)
                .ok_or_else(|| AppError::Validation("El salón no existe o está inactivo".to_string()))?;
        }

        if disciplina_id != actual.disciplina_id {
            self.repository
                .find_disciplina(disciplina_id)
                .await?
                .filter(|d| d.activo)
                .ok_or_else(|| {
                    AppError::Validation("La disciplina no existe o está inactiva".to_string())
                })?;
        }

        let clase = self
            .repository
            .update(
                id,
                request.nombre_clase.or(actual.nombre_clase),
                request.descripcion.or(actual.descripcion),
                fecha_hora,
                duracion,
                salon_id,
                disciplina_id,
                capacidad,
                request.notas_coach.or(actual.notas_coach),
                request.playlist_url.or(actual.playlist_url),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            clase,
            "Clase actualizada exitosamente".to_string(),
        ))
    }

    pub async fn asignar_coach_directo(
        &self,
        clase_id: Uuid,
        coach_id: Uuid,
        admin_id: Uuid,
    ) -> Result<ApiResponse<Clase>, AppError> {
        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        let coach = self
            .perfiles
            .find_by_id(coach_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coach no encontrado".to_string()))?;
        if coach.rol != Rol::Coach {
            return Err(AppError::Validation(
                "El perfil seleccionado no es un coach".to_string(),
            ));
        }

        let afectadas = self
            .repository
            .asignar_coach(clase_id, coach_id, admin_id)
            .await?;

        if afectadas == 0 {
            // Reasignar es desasignar y luego asignar, no un swap atómico
            if clase.coach_id.is_some() {
                return Err(AppError::Conflict(
                    "La clase ya tiene un coach asignado; desasigna primero".to_string(),
                ));
            }
            return Err(AppError::Conflict(
                "Solo una clase programada puede recibir coach".to_string(),
            ));
        }

        self.notificaciones
            .enviar(
                coach_id,
                "clase_asignada",
                "Nueva clase asignada",
                "Te asignaron una clase. Revisa tu calendario.",
                Some(format!("/coach/clases/{}", clase_id)),
            )
            .await;

        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        Ok(ApiResponse::success_with_message(
            clase,
            "Coach asignado exitosamente".to_string(),
        ))
    }

    pub async fn desasignar_coach(&self, clase_id: Uuid) -> Result<ApiResponse<Clase>, AppError> {
        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if clase.coach_id.is_none() {
            return Err(AppError::Conflict("La clase no tiene coach asignado".to_string()));
        }

        let afectadas = self.repository.desasignar_coach(clase_id).await?;
        if afectadas == 0 {
            return Err(AppError::Conflict(
                "Solo una clase programada puede quedarse sin coach".to_string(),
            ));
        }

        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        Ok(ApiResponse::success_with_message(
            clase,
            "Coach desasignado".to_string(),
        ))
    }

    /// Cancelar la clase, cancelar sus reservas confirmadas (liberando
    /// espacios) y avisar a los clientes afectados
    pub async fn cancelar(&self, clase_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if !clase.estado.puede_transicionar_a(ClaseEstado::Cancelada) {
            return Err(AppError::Conflict(
                "Solo una clase programada puede cancelarse".to_string(),
            ));
        }

        // Condicional al estado leído: si otra petición ganó, conflicto
        let afectadas = self
            .repository
            .cambiar_estado(clase_id, clase.estado, ClaseEstado::Cancelada)
            .await?;

        if afectadas == 0 {
            return Err(AppError::Conflict(
                "Solo una clase programada puede cancelarse".to_string(),
            ));
        }

        let canceladas = self.reservas.cancelar_por_clase(clase_id).await?;
        let clientes: Vec<Uuid> = canceladas.iter().map(|r| r.cliente_id).collect();
        let nombre = clase.nombre_clase.unwrap_or_else(|| "clase".to_string());
        self.notificaciones
            .enviar_a_varios(
                &clientes,
                "clase_cancelada",
                "Clase cancelada",
                &format!(
                    "La {} del {} fue cancelada. Tu crédito queda disponible.",
                    nombre,
                    clase.fecha_hora.format("%d/%m %H:%M")
                ),
                Some("/mis-reservas".to_string()),
            )
            .await;

        Ok(ApiResponse::message_only("Clase cancelada".to_string()))
    }

    /// Marcar la clase como completada, cerrar sus reservas y registrar
    /// el uso de los espacios ocupados
    pub async fn completar(&self, clase_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if !clase.estado.puede_transicionar_a(ClaseEstado::Completada) {
            return Err(AppError::Conflict(
                "Solo una clase programada o en curso puede completarse".to_string(),
            ));
        }

        let afectadas = self
            .repository
            .cambiar_estado(clase_id, clase.estado, ClaseEstado::Completada)
            .await?;

        if afectadas == 0 {
            return Err(AppError::Conflict(
                "Solo una clase programada o en curso puede completarse".to_string(),
            ));
        }

        let completadas = self.reservas.completar_confirmadas(clase_id).await?;
        for reserva in &completadas {
            if let Some(espacio_id) = reserva.espacio_id {
                self.espacios.registrar_uso(espacio_id).await?;
            }
        }

        Ok(ApiResponse::message_only(format!(
            "Clase completada ({} asistencias)",
            completadas.len()
        )))
    }

    /// Borrado físico; prohibido mientras existan reservas
    pub async fn eliminar(&self, clase_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let clase = self
            .repository
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if clase.reservas_count > 0 {
            return Err(AppError::Conflict(format!(
                "No se puede eliminar: la clase tiene {} reserva(s)",
                clase.reservas_count
            )));
        }

        self.repository.delete(clase_id).await?;

        Ok(ApiResponse::message_only("Clase eliminada".to_string()))
    }

    pub async fn obtener(&self, clase_id: Uuid) -> Result<ClaseDetalle, AppError> {
        self.repository
            .find_detalle(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))
    }

    pub async fn listar(&self, filtros: ClaseFiltros) -> Result<Vec<ClaseDetalle>, AppError> {
        self.repository.listar(&filtros).await
    }

    pub async fn listar_disciplinas(&self) -> Result<Vec<Disciplina>, AppError> {
        self.repository.listar_disciplinas().await
    }
}
