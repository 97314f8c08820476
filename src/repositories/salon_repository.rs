//! Repositorio de salones

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::salon::Salon;
use crate::utils::errors::AppError;

pub struct SalonRepository {
    pool: PgPool,
}

impl SalonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: String,
        tipo: String,
        capacidad_maxima: i32,
    ) -> Result<Salon, AppError> {
        let salon = sqlx::query_as::<_, Salon>(
            r#"
            INSERT INTO salones (id, nombre, tipo, capacidad_maxima, activo)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nombre)
        .bind(tipo)
        .bind(capacidad_maxima)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando salón: {}", e)))?;

        Ok(salon)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Salon>, AppError> {
        let salon = sqlx::query_as::<_, Salon>("SELECT * FROM salones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando salón: {}", e)))?;

        Ok(salon)
    }

    pub async fn listar(&self) -> Result<Vec<Salon>, AppError> {
        let salones = sqlx::query_as::<_, Salon>("SELECT * FROM salones ORDER BY nombre")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listando salones: {}", e)))?;

        Ok(salones)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nombre: String,
        tipo: String,
        capacidad_maxima: i32,
        activo: bool,
    ) -> Result<Salon, AppError> {
        let salon = sqlx::query_as::<_, Salon>(
            r#"
            UPDATE salones
            SET nombre = $2, tipo = $3, capacidad_maxima = $4, activo = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(tipo)
        .bind(capacidad_maxima)
        .bind(activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error actualizando salón: {}", e)))?;

        Ok(salon)
    }

    /// Cuántos espacios tiene creados el salón (acotado por capacidad_maxima)
    pub async fn contar_espacios(&self, salon_id: Uuid) -> Result<i64, AppError> {
        let cuenta: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM espacios WHERE salon_id = $1")
                .bind(salon_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error contando espacios: {}", e)))?;

        Ok(cuenta.0)
    }
}
