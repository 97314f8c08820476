//! Repositorio de personal

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::personal::{Personal, RevisionEstado, TipoPersonal};
use crate::utils::errors::AppError;

pub struct PersonalRepository {
    pool: PgPool,
}

impl PersonalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta inicial al aceptar la invitación; los pasos siguientes del
    /// onboarding van llenando el resto de los campos.
    pub async fn create(
        &self,
        perfil_id: Uuid,
        tipo: TipoPersonal,
        email: String,
    ) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            INSERT INTO personal (id, perfil_id, tipo, nombre_completo, email, estado, activo,
                                  onboarding_completo, documentos_completos, es_head_coach,
                                  created_at)
            VALUES ($1, $2, $3, '', $4, 'pendiente', FALSE, FALSE, FALSE, FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(perfil_id)
        .bind(tipo)
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando personal: {}", e)))?;

        Ok(personal)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Personal>, AppError> {
        let personal = sqlx::query_as::<_, Personal>("SELECT * FROM personal WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando personal: {}", e)))?;

        Ok(personal)
    }

    pub async fn listar(
        &self,
        tipo: Option<TipoPersonal>,
        estado: Option<RevisionEstado>,
    ) -> Result<Vec<Personal>, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            SELECT * FROM personal
            WHERE ($1::tipo_personal IS NULL OR tipo = $1)
              AND ($2::revision_estado IS NULL OR estado = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(tipo)
        .bind(estado)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando personal: {}", e)))?;

        Ok(personal)
    }

    pub async fn guardar_datos_personales(
        &self,
        id: Uuid,
        nombre_completo: String,
        telefono: Option<String>,
        disciplina: Option<String>,
        puesto: Option<String>,
    ) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET nombre_completo = $2, telefono = $3, disciplina = $4, puesto = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre_completo)
        .bind(telefono)
        .bind(disciplina)
        .bind(puesto)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error guardando datos personales: {}", e)))?;

        Ok(personal)
    }

    /// Cierra el onboarding: firma registrada, expediente listo para revisión
    pub async fn finalizar_onboarding(
        &self,
        id: Uuid,
        contrato_firmado_at: DateTime<Utc>,
    ) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET onboarding_completo = TRUE, contrato_firmado_at = $2, estado = 'pendiente'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(contrato_firmado_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finalizando onboarding: {}", e)))?;

        Ok(personal)
    }

    pub async fn aprobar(&self, id: Uuid) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET estado = 'aprobado', activo = TRUE, documentos_completos = TRUE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error aprobando personal: {}", e)))?;

        Ok(personal)
    }

    pub async fn rechazar(&self, id: Uuid) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET estado = 'rechazado', activo = FALSE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error rechazando personal: {}", e)))?;

        Ok(personal)
    }

    pub async fn marcar_documentos_completos(
        &self,
        id: Uuid,
        completos: bool,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE personal SET documentos_completos = $2 WHERE id = $1")
            .bind(id)
            .bind(completos)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error marcando documentos: {}", e)))?;

        Ok(())
    }

    pub async fn designar_head_coach(
        &self,
        id: Uuid,
        es_head_coach: bool,
        disciplina: Option<String>,
    ) -> Result<Personal, AppError> {
        let personal = sqlx::query_as::<_, Personal>(
            r#"
            UPDATE personal
            SET es_head_coach = $2,
                disciplina = COALESCE($3, disciplina)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(es_head_coach)
        .bind(disciplina)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error designando head coach: {}", e)))?;

        Ok(personal)
    }
}
