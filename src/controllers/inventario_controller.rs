//! Controller de inventario (salones y espacios)
//!
//! Las estadísticas por salón se sirven desde Redis cuando hay una
//! copia fresca; cualquier mutación del inventario invalida la entrada.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::cache::{CacheOperations, RedisClient};
use crate::dto::comun::ApiResponse;
use crate::dto::inventario_dto::{
    ActualizarEstadoEspacioRequest, ActualizarSalonRequest, CrearEspacioRequest,
    CrearSalonRequest, EstadisticasSalon,
};
use crate::models::espacio::Espacio;
use crate::models::salon::Salon;
use crate::repositories::espacio_repository::EspacioRepository;
use crate::repositories::salon_repository::SalonRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validar_positivo;

pub struct InventarioController {
    salones: SalonRepository,
    espacios: EspacioRepository,
    redis: RedisClient,
}

impl InventarioController {
    pub fn new(pool: PgPool, redis: RedisClient) -> Self {
        Self {
            salones: SalonRepository::new(pool.clone()),
            espacios: EspacioRepository::new(pool),
            redis,
        }
    }

    pub async fn crear_salon(
        &self,
        request: CrearSalonRequest,
    ) -> Result<ApiResponse<Salon>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        validar_positivo(request.capacidad_maxima, "capacidad_maxima")?;

        let salon = self
            .salones
            .create(request.nombre, request.tipo, request.capacidad_maxima)
            .await?;

        Ok(ApiResponse::success_with_message(
            salon,
            "Salón creado".to_string(),
        ))
    }

    pub async fn actualizar_salon(
        &self,
        salon_id: Uuid,
        request: ActualizarSalonRequest,
    ) -> Result<ApiResponse<Salon>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let actual = self
            .salones
            .find_by_id(salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salón no encontrado".to_string()))?;

        let capacidad = request.capacidad_maxima.unwrap_or(actual.capacidad_maxima);
        validar_positivo(capacidad, "capacidad_maxima")?;

        // La capacidad no puede quedar por debajo de los espacios ya creados
        let espacios_creados = self.salones.contar_espacios(salon_id).await?;
        if (capacidad as i64) < espacios_creados {
            return Err(AppError::Conflict(format!(
                "El salón ya tiene {} espacio(s); la capacidad no puede ser menor",
                espacios_creados
            )));
        }

        let salon = self
            .salones
            .update(
                salon_id,
                request.nombre.unwrap_or(actual.nombre),
                request.tipo.unwrap_or(actual.tipo),
                capacidad,
                request.activo.unwrap_or(actual.activo),
            )
            .await?;

        self.invalidar_estadisticas(salon_id).await;

        Ok(ApiResponse::success_with_message(
            salon,
            "Salón actualizado".to_string(),
        ))
    }

    pub async fn listar_salones(&self) -> Result<Vec<Salon>, AppError> {
        self.salones.listar().await
    }

    pub async fn obtener_salon(&self, salon_id: Uuid) -> Result<Salon, AppError> {
        self.salones
            .find_by_id(salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salón no encontrado".to_string()))
    }

    pub async fn crear_espacio(
        &self,
        request: CrearEspacioRequest,
    ) -> Result<ApiResponse<Espacio>, AppError> {
        validar_positivo(request.numero, "numero")?;
        validar_positivo(request.usos_para_mantenimiento, "usos_para_mantenimiento")?;

        let salon = self
            .salones
            .find_by_id(request.salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salón no encontrado".to_string()))?;

        if !salon.activo {
            return Err(AppError::Conflict("El salón está inactivo".to_string()));
        }

        let creados = self.salones.contar_espacios(salon.id).await?;
        if creados >= salon.capacidad_maxima as i64 {
            return Err(AppError::Conflict(format!(
                "El salón ya alcanzó su capacidad máxima de {} espacios",
                salon.capacidad_maxima
            )));
        }

        if self.espacios.numero_existe(salon.id, request.numero).await? {
            return Err(AppError::Conflict(format!(
                "El número {} ya está ocupado en este salón",
                request.numero
            )));
        }

        let espacio = self
            .espacios
            .create(
                salon.id,
                request.numero,
                request.tipo_equipo,
                request.usos_para_mantenimiento,
            )
            .await?;

        self.invalidar_estadisticas(salon.id).await;

        Ok(ApiResponse::success_with_message(
            espacio,
            "Espacio creado".to_string(),
        ))
    }

    pub async fn listar_espacios(&self, salon_id: Uuid) -> Result<Vec<Espacio>, AppError> {
        self.salones
            .find_by_id(salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salón no encontrado".to_string()))?;

        self.espacios.listar_por_salon(salon_id).await
    }

    pub async fn actualizar_estado_espacio(
        &self,
        espacio_id: Uuid,
        request: ActualizarEstadoEspacioRequest,
    ) -> Result<ApiResponse<Espacio>, AppError> {
        let actual = self
            .espacios
            .find_by_id(espacio_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Espacio no encontrado".to_string()))?;

        let espacio = self
            .espacios
            .actualizar_estado(espacio_id, actual.estado, request.estado)
            .await?;

        self.invalidar_estadisticas(espacio.salon_id).await;

        Ok(ApiResponse::success_with_message(
            espacio,
            "Estado actualizado".to_string(),
        ))
    }

    /// Sumar un uso al contador de mantenimiento del espacio.
    pub async fn registrar_uso_espacio(
        &self,
        espacio_id: Uuid,
    ) -> Result<ApiResponse<Espacio>, AppError> {
        self.espacios
            .find_by_id(espacio_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Espacio no encontrado".to_string()))?;

        let espacio = self.espacios.registrar_uso(espacio_id).await?;

        self.invalidar_estadisticas(espacio.salon_id).await;

        Ok(ApiResponse::success_with_message(
            espacio,
            "Uso registrado".to_string(),
        ))
    }

    /// Dashboard de un salón: conteos por estado + alertas de mantenimiento.
    pub async fn estadisticas_salon(
        &self,
        salon_id: Uuid,
    ) -> Result<EstadisticasSalon, AppError> {
        let key = self.redis.estadisticas_salon_key(&salon_id.to_string());

        match self.redis.get::<EstadisticasSalon>(&key).await {
            Ok(Some(cacheadas)) => return Ok(cacheadas),
            Ok(None) => {}
            Err(e) => warn!("⚠️ Cache de estadísticas no disponible: {}", e),
        }

        self.salones
            .find_by_id(salon_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Salón no encontrado".to_string()))?;

        let (total, disponibles, ocupados, mantenimiento) =
            self.espacios.contar_por_estado(salon_id).await?;

        let alertas: Vec<Espacio> = self
            .espacios
            .listar_por_salon(salon_id)
            .await?
            .into_iter()
            .filter(|e| e.requiere_alerta_mantenimiento())
            .collect();

        let estadisticas = EstadisticasSalon {
            salon_id,
            total_espacios: total,
            disponibles,
            ocupados,
            en_mantenimiento: mantenimiento,
            alertas_mantenimiento: alertas,
        };

        if let Err(e) = self
            .redis
            .set(&key, &estadisticas, self.redis.default_ttl())
            .await
        {
            warn!("⚠️ No se pudieron cachear las estadísticas: {}", e);
        }

        Ok(estadisticas)
    }

    async fn invalidar_estadisticas(&self, salon_id: Uuid) {
        let key = self.redis.estadisticas_salon_key(&salon_id.to_string());
        if let Err(e) = self.redis.delete(&key).await {
            warn!("⚠️ No se pudo invalidar el cache de estadísticas: {}", e);
        }
    }
}
