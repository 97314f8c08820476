//! Repositorio de documentos de personal
//!
//! Cada re-subida de un mismo tipo de documento crea una fila con
//! versión incrementada; solo cuenta la última versión de cada tipo
//! para decidir si el expediente está completo.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::documento::Documento;
use crate::utils::errors::AppError;

pub struct DocumentoRepository {
    pool: PgPool,
}

impl DocumentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        personal_id: Uuid,
        tipo_documento: String,
        url_archivo: String,
    ) -> Result<Documento, AppError> {
        let documento = sqlx::query_as::<_, Documento>(
            r#"
            INSERT INTO documentos_personal (id, personal_id, tipo_documento, url_archivo,
                                             estado, version, created_at)
            VALUES ($1, $2, $3, $4, 'pendiente',
                    (SELECT COALESCE(MAX(version), 0) + 1
                     FROM documentos_personal
                     WHERE personal_id = $2 AND tipo_documento = $3),
                    $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(personal_id)
        .bind(tipo_documento)
        .bind(url_archivo)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando documento: {}", e)))?;

        Ok(documento)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Documento>, AppError> {
        let documento =
            sqlx::query_as::<_, Documento>("SELECT * FROM documentos_personal WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error buscando documento: {}", e)))?;

        Ok(documento)
    }

    /// Última versión de cada tipo de documento del expediente
    pub async fn listar_por_personal(&self, personal_id: Uuid) -> Result<Vec<Documento>, AppError> {
        let documentos = sqlx::query_as::<_, Documento>(
            r#"
            SELECT DISTINCT ON (tipo_documento) *
            FROM documentos_personal
            WHERE personal_id = $1
            ORDER BY tipo_documento, version DESC
            "#,
        )
        .bind(personal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando documentos: {}", e)))?;

        Ok(documentos)
    }

    pub async fn aprobar(&self, id: Uuid) -> Result<Documento, AppError> {
        let documento = sqlx::query_as::<_, Documento>(
            r#"
            UPDATE documentos_personal
            SET estado = 'aprobado', comentarios_admin = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error aprobando documento: {}", e)))?;

        Ok(documento)
    }

    pub async fn rechazar(&self, id: Uuid, comentario: String) -> Result<Documento, AppError> {
        let documento = sqlx::query_as::<_, Documento>(
            r#"
            UPDATE documentos_personal
            SET estado = 'rechazado', comentarios_admin = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(comentario)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error rechazando documento: {}", e)))?;

        Ok(documento)
    }

    /// ¿La última versión de cada tipo está aprobada (y hay al menos una)?
    pub async fn todos_aprobados(&self, personal_id: Uuid) -> Result<bool, AppError> {
        let fila: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE estado = 'aprobado')
            FROM (
                SELECT DISTINCT ON (tipo_documento) estado
                FROM documentos_personal
                WHERE personal_id = $1
                ORDER BY tipo_documento, version DESC
            ) ultimos
            "#,
        )
        .bind(personal_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error verificando documentos: {}", e)))?;

        let (total, aprobados) = fila;
        Ok(total > 0 && total == aprobados)
    }
}
