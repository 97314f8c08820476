//! Controller de reservas
//!
//! El corazón del manejo de cupo: crear contra la capacidad (el chequeo
//! y el incremento son un solo UPDATE condicional en el repositorio),
//! cancelar con ventana de penalización y desbordar a lista de espera
//! cuando la clase está llena.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::RedisClient;
use crate::dto::comun::ApiResponse;
use crate::dto::reserva_dto::{
    CancelarReservaRequest, CrearReservaRequest, ReservaFiltros, ResultadoCancelacion,
    ResultadoReserva,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::clase::ClaseEstado;
use crate::models::espacio::EspacioEstado;
use crate::models::perfil::Rol;
use crate::models::reserva::{ReservaDetalle, ReservaEstado};
use crate::repositories::clase_repository::ClaseRepository;
use crate::repositories::espacio_repository::EspacioRepository;
use crate::repositories::reserva_repository::{IntentoReserva, ReservaRepository};
use crate::services::notificacion_service::NotificacionService;
use crate::utils::errors::AppError;

pub struct ReservaController {
    repository: ReservaRepository,
    clases: ClaseRepository,
    espacios: EspacioRepository,
    notificaciones: NotificacionService,
    ventana_cancelacion_horas: i64,
}

impl ReservaController {
    pub fn new(pool: PgPool, redis: RedisClient, ventana_cancelacion_horas: i64) -> Self {
        Self {
            repository: ReservaRepository::new(pool.clone()),
            clases: ClaseRepository::new(pool.clone()),
            espacios: EspacioRepository::new(pool.clone()),
            notificaciones: NotificacionService::new(pool, redis),
            ventana_cancelacion_horas,
        }
    }

    pub async fn crear(
        &self,
        user: &AuthenticatedUser,
        request: CrearReservaRequest,
    ) -> Result<ApiResponse<ResultadoReserva>, AppError> {
        let clase = self
            .clases
            .find_by_id(request.clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        if clase.estado != ClaseEstado::Programada {
            return Err(AppError::Conflict(
                "Solo se puede reservar una clase programada".to_string(),
            ));
        }

        if clase.fecha_hora <= Utc::now() {
            return Err(AppError::Validation(
                "La clase ya comenzó o ya pasó".to_string(),
            ));
        }

        // Guard de idempotencia: una sola reserva confirmada por cliente
        if self
            .repository
            .tiene_confirmada(clase.id, user.perfil_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya tienes una reserva confirmada para esta clase".to_string(),
            ));
        }

        if let Some(espacio_id) = request.espacio_id {
            let espacio = self
                .espacios
                .find_by_id(espacio_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Espacio no encontrado".to_string()))?;

            if espacio.salon_id != clase.salon_id {
                return Err(AppError::Validation(
                    "El espacio no pertenece al salón de la clase".to_string(),
                ));
            }

            if espacio.estado != EspacioEstado::Disponible {
                return Err(AppError::Conflict("El espacio no está disponible".to_string()));
            }
        }

        if clase.esta_llena() {
            return self.a_lista_espera(clase.id, user.perfil_id).await;
        }

        match self
            .repository
            .crear_confirmada(clase.id, user.perfil_id, request.espacio_id)
            .await?
        {
            IntentoReserva::Confirmada(reserva) => Ok(ApiResponse::success_with_message(
                ResultadoReserva {
                    en_lista_espera: false,
                    reserva: Some(reserva),
                    lista_espera: None,
                },
                "Reserva confirmada".to_string(),
            )),
            // Otra request ganó el último lugar entre la verificación y el commit
            IntentoReserva::ClaseLlena => self.a_lista_espera(clase.id, user.perfil_id).await,
            IntentoReserva::EspacioOcupado => Err(AppError::Conflict(
                "El espacio no está disponible".to_string(),
            )),
        }
    }

    async fn a_lista_espera(
        &self,
        clase_id: Uuid,
        cliente_id: Uuid,
    ) -> Result<ApiResponse<ResultadoReserva>, AppError> {
        if self.repository.en_lista_espera(clase_id, cliente_id).await? {
            return Err(AppError::Conflict(
                "Ya estás en la lista de espera de esta clase".to_string(),
            ));
        }

        let entrada = self
            .repository
            .agregar_lista_espera(clase_id, cliente_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            ResultadoReserva {
                en_lista_espera: true,
                reserva: None,
                lista_espera: Some(entrada),
            },
            "Clase llena: quedaste en lista de espera".to_string(),
        ))
    }

    pub async fn cancelar(
        &self,
        reserva_id: Uuid,
        user: &AuthenticatedUser,
        request: CancelarReservaRequest,
    ) -> Result<ApiResponse<ResultadoCancelacion>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let reserva = self
            .repository
            .find_by_id(reserva_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        // Solo el dueño de la reserva (o un admin) puede cancelarla
        if reserva.cliente_id != user.perfil_id && user.rol != Rol::Admin {
            return Err(AppError::Forbidden(
                "No puedes cancelar una reserva ajena".to_string(),
            ));
        }

        if reserva.estado != ReservaEstado::Confirmada {
            return Err(AppError::Conflict(
                "Solo una reserva confirmada puede cancelarse".to_string(),
            ));
        }

        let clase = self
            .clases
            .find_by_id(reserva.clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        let ahora = Utc::now();
        if clase.fecha_hora <= ahora {
            return Err(AppError::Validation(
                "No se puede cancelar una clase que ya pasó".to_string(),
            ));
        }

        let tardia =
            es_cancelacion_tardia(clase.fecha_hora, ahora, self.ventana_cancelacion_horas);

        let reserva = self
            .repository
            .cancelar(reserva_id, request.razon, tardia)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("La reserva ya había sido cancelada".to_string())
            })?;

        // Se liberó un lugar: avisar al primero de la lista de espera
        // (FIFO, sin promoción automática; el lugar se gana reservando)
        if let Some(entrada) = self.repository.primera_sin_notificar(clase.id).await? {
            self.notificaciones
                .enviar(
                    entrada.cliente_id,
                    "lugar_disponible",
                    "¡Se liberó un lugar!",
                    &format!(
                        "Se liberó un lugar en la clase del {}. Reserva antes de que se ocupe.",
                        clase.fecha_hora.format("%d/%m %H:%M")
                    ),
                    Some(format!("/clases/{}", clase.id)),
                )
                .await;
            self.repository.marcar_notificado(entrada.id).await?;
        }

        let mensaje = if tardia {
            "Reserva cancelada (cancelación tardía: se cobra un crédito adicional)"
        } else {
            "Reserva cancelada"
        };

        Ok(ApiResponse::success_with_message(
            ResultadoCancelacion {
                reserva,
                cancelacion_tardia: tardia,
            },
            mensaje.to_string(),
        ))
    }

    pub async fn mis_reservas(
        &self,
        user: &AuthenticatedUser,
        filtros: ReservaFiltros,
    ) -> Result<Vec<ReservaDetalle>, AppError> {
        self.repository
            .mis_reservas(user.perfil_id, filtros.estado)
            .await
    }

    pub async fn listar_por_clase(
        &self,
        clase_id: Uuid,
    ) -> Result<Vec<ReservaDetalle>, AppError> {
        self.clases
            .find_by_id(clase_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Clase no encontrada".to_string()))?;

        self.repository.listar_por_clase(clase_id).await
    }
}

/// Cancelar a menos de `ventana_horas` del inicio cuenta como tardía
pub fn es_cancelacion_tardia(
    fecha_hora: DateTime<Utc>,
    ahora: DateTime<Utc>,
    ventana_horas: i64,
) -> bool {
    fecha_hora.signed_duration_since(ahora) < Duration::hours(ventana_horas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelacion_una_hora_antes_es_tardia() {
        let ahora = Utc::now();
        assert!(es_cancelacion_tardia(ahora + Duration::hours(1), ahora, 2));
    }

    #[test]
    fn test_cancelacion_tres_horas_antes_no_es_tardia() {
        let ahora = Utc::now();
        assert!(!es_cancelacion_tardia(ahora + Duration::hours(3), ahora, 2));
    }

    #[test]
    fn test_frontera_exacta_no_es_tardia() {
        let ahora = Utc::now();
        // Exactamente 2h antes no entra en la ventana (< es estricto)
        assert!(!es_cancelacion_tardia(ahora + Duration::hours(2), ahora, 2));
        assert!(es_cancelacion_tardia(
            ahora + Duration::hours(2) - Duration::minutes(1),
            ahora,
            2
        ));
    }
}
