//! Repositorio de clases
//!
//! Acceso a la tabla clases. Las mutaciones sensibles a concurrencia
//! (asignación de coach, contador de reservas) se hacen con UPDATEs
//! condicionales: cero filas afectadas significa que la precondición
//! ya no se cumplía al momento de ejecutar.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::clase_dto::ClaseFiltros;
use crate::models::clase::{Clase, ClaseDetalle, ClaseEstado, Disciplina};
use crate::utils::errors::AppError;

pub struct ClaseRepository {
    pool: PgPool,
}

impl ClaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        nombre_clase: Option<String>,
        descripcion: Option<String>,
        fecha_hora: DateTime<Utc>,
        duracion: i32,
        salon_id: Uuid,
        disciplina_id: Uuid,
        especialidad_id: Option<Uuid>,
        capacidad: i32,
    ) -> Result<Clase, AppError> {
        let clase = sqlx::query_as::<_, Clase>(
            r#"
            INSERT INTO clases (id, nombre_clase, descripcion, fecha_hora, duracion, salon_id,
                                disciplina_id, especialidad_id, coach_id, capacidad, reservas_count,
                                estado, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9, 0, 'programada', $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nombre_clase)
        .bind(descripcion)
        .bind(fecha_hora)
        .bind(duracion)
        .bind(salon_id)
        .bind(disciplina_id)
        .bind(especialidad_id)
        .bind(capacidad)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando clase: {}", e)))?;

        Ok(clase)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Clase>, AppError> {
        let clase = sqlx::query_as::<_, Clase>("SELECT * FROM clases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando clase: {}", e)))?;

        Ok(clase)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        nombre_clase: Option<String>,
        descripcion: Option<String>,
        fecha_hora: DateTime<Utc>,
        duracion: i32,
        salon_id: Uuid,
        disciplina_id: Uuid,
        capacidad: i32,
        notas_coach: Option<String>,
        playlist_url: Option<String>,
    ) -> Result<Clase, AppError> {
        let clase = sqlx::query_as::<_, Clase>(
            r#"
            UPDATE clases
            SET nombre_clase = $2, descripcion = $3, fecha_hora = $4, duracion = $5,
                salon_id = $6, disciplina_id = $7, capacidad = $8, notas_coach = $9,
                playlist_url = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre_clase)
        .bind(descripcion)
        .bind(fecha_hora)
        .bind(duracion)
        .bind(salon_id)
        .bind(disciplina_id)
        .bind(capacidad)
        .bind(notas_coach)
        .bind(playlist_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error actualizando clase: {}", e)))?;

        Ok(clase)
    }

    pub async fn listar(&self, filtros: &ClaseFiltros) -> Result<Vec<ClaseDetalle>, AppError> {
        let clases = sqlx::query_as::<_, ClaseDetalle>(
            r#"
            SELECT c.id, c.nombre_clase, c.fecha_hora, c.duracion,
                   c.salon_id, s.nombre AS nombre_salon,
                   c.disciplina_id, d.nombre AS nombre_disciplina,
                   c.coach_id, p.nombre_completo AS nombre_coach,
                   c.capacidad, c.reservas_count, c.estado
            FROM clases c
            JOIN salones s ON s.id = c.salon_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            LEFT JOIN perfiles p ON p.id = c.coach_id
            WHERE ($1::clase_estado IS NULL OR c.estado = $1)
              AND ($2::uuid IS NULL OR c.salon_id = $2)
              AND ($3::uuid IS NULL OR c.coach_id = $3)
              AND ($4::timestamptz IS NULL OR c.fecha_hora >= $4)
              AND ($5::timestamptz IS NULL OR c.fecha_hora <= $5)
            ORDER BY c.fecha_hora ASC
            "#,
        )
        .bind(filtros.estado)
        .bind(filtros.salon_id)
        .bind(filtros.coach_id)
        .bind(filtros.desde)
        .bind(filtros.hasta)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando clases: {}", e)))?;

        Ok(clases)
    }

    pub async fn find_detalle(&self, id: Uuid) -> Result<Option<ClaseDetalle>, AppError> {
        let clase = sqlx::query_as::<_, ClaseDetalle>(
            r#"
            SELECT c.id, c.nombre_clase, c.fecha_hora, c.duracion,
                   c.salon_id, s.nombre AS nombre_salon,
                   c.disciplina_id, d.nombre AS nombre_disciplina,
                   c.coach_id, p.nombre_completo AS nombre_coach,
                   c.capacidad, c.reservas_count, c.estado
            FROM clases c
            JOIN salones s ON s.id = c.salon_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            LEFT JOIN perfiles p ON p.id = c.coach_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error buscando clase: {}", e)))?;

        Ok(clase)
    }

    /// Asignar coach solo si la clase sigue programada y sin coach.
    /// Devuelve las filas afectadas: 0 = la precondición falló.
    pub async fn asignar_coach(
        &self,
        clase_id: Uuid,
        coach_id: Uuid,
        asignada_por: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE clases
            SET coach_id = $2, asignada_por = $3, asignada_at = $4
            WHERE id = $1 AND coach_id IS NULL AND estado = 'programada'
            "#,
        )
        .bind(clase_id)
        .bind(coach_id)
        .bind(asignada_por)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error asignando coach: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Quitar al coach; solo válido mientras la clase está programada.
    pub async fn desasignar_coach(&self, clase_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE clases
            SET coach_id = NULL, asignada_por = NULL, asignada_at = NULL
            WHERE id = $1 AND estado = 'programada'
            "#,
        )
        .bind(clase_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error desasignando coach: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Transición de estado condicionada al estado actual (sin resurrección).
    pub async fn cambiar_estado(
        &self,
        clase_id: Uuid,
        desde: ClaseEstado,
        hacia: ClaseEstado,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE clases SET estado = $3 WHERE id = $1 AND estado = $2")
            .bind(clase_id)
            .bind(desde)
            .bind(hacia)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error cambiando estado de clase: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Borrado físico; el guard de reservas existentes vive en el controller.
    pub async fn delete(&self, clase_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clases WHERE id = $1")
            .bind(clase_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error eliminando clase: {}", e)))?;

        Ok(())
    }

    pub async fn find_disciplina(&self, id: Uuid) -> Result<Option<Disciplina>, AppError> {
        let disciplina =
            sqlx::query_as::<_, Disciplina>("SELECT * FROM disciplinas WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error buscando disciplina: {}", e)))?;

        Ok(disciplina)
    }

    pub async fn listar_disciplinas(&self) -> Result<Vec<Disciplina>, AppError> {
        let disciplinas = sqlx::query_as::<_, Disciplina>(
            "SELECT * FROM disciplinas WHERE activo = TRUE ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando disciplinas: {}", e)))?;

        Ok(disciplinas)
    }
}
