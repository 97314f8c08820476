//! Repositorio de reservas
//!
//! La creación de una reserva hace el chequeo de cupo y el incremento
//! del contador como un solo UPDATE condicional dentro de una
//! transacción: dos requests concurrentes por el último lugar no pueden
//! pasar ambas, la segunda ve cero filas afectadas y aborta.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reserva::{ListaEspera, Reserva, ReservaDetalle, ReservaEstado};
use crate::utils::errors::AppError;

/// Desenlace del intento de reserva dentro de la transacción
#[derive(Debug)]
pub enum IntentoReserva {
    Confirmada(Reserva),
    /// El cupo se agotó entre la verificación del controller y el commit
    ClaseLlena,
    /// Otra petición reclamó el mismo espacio primero
    EspacioOcupado,
}

pub struct ReservaRepository {
    pool: PgPool,
}

impl ReservaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una reserva confirmada ocupando un lugar (y el espacio, si
    /// se eligió uno).
    ///
    /// Los dos UPDATEs son condicionales: cero filas afectadas significa
    /// que otra petición ganó entre la verificación del controller y este
    /// commit, y la transacción se revierte.
    pub async fn crear_confirmada(
        &self,
        clase_id: Uuid,
        cliente_id: Uuid,
        espacio_id: Option<Uuid>,
    ) -> Result<IntentoReserva, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error abriendo transacción: {}", e)))?;

        let ocupado = sqlx::query(
            r#"
            UPDATE clases
            SET reservas_count = reservas_count + 1
            WHERE id = $1 AND estado = 'programada' AND reservas_count < capacidad
            "#,
        )
        .bind(clase_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error ocupando lugar: {}", e)))?;

        if ocupado.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| AppError::Database(format!("Error en rollback: {}", e)))?;
            return Ok(IntentoReserva::ClaseLlena);
        }

        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            INSERT INTO reservas (id, clase_id, cliente_id, espacio_id, estado,
                                  cancelacion_tardia, created_at)
            VALUES ($1, $2, $3, $4, 'confirmada', FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(clase_id)
        .bind(cliente_id)
        .bind(espacio_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error insertando reserva: {}", e)))?;

        if let Some(espacio) = espacio_id {
            let reclamado = sqlx::query(
                "UPDATE espacios SET estado = 'ocupado' WHERE id = $1 AND estado = 'disponible'",
            )
            .bind(espacio)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error ocupando espacio: {}", e)))?;

            if reclamado.rows_affected() == 0 {
                tx.rollback()
                    .await
                    .map_err(|e| AppError::Database(format!("Error en rollback: {}", e)))?;
                return Ok(IntentoReserva::EspacioOcupado);
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error en commit: {}", e)))?;

        Ok(IntentoReserva::Confirmada(reserva))
    }

    /// Cancelar una reserva confirmada, liberando el lugar y el espacio.
    ///
    /// Devuelve None si la reserva ya no estaba confirmada.
    pub async fn cancelar(
        &self,
        reserva_id: Uuid,
        razon: Option<String>,
        tardia: bool,
    ) -> Result<Option<Reserva>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error abriendo transacción: {}", e)))?;

        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas
            SET estado = 'cancelada', razon_cancelacion = $2, cancelacion_tardia = $3
            WHERE id = $1 AND estado = 'confirmada'
            RETURNING *
            "#,
        )
        .bind(reserva_id)
        .bind(razon)
        .bind(tardia)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error cancelando reserva: {}", e)))?;

        let Some(reserva) = reserva else {
            tx.rollback()
                .await
                .map_err(|e| AppError::Database(format!("Error en rollback: {}", e)))?;
            return Ok(None);
        };

        sqlx::query(
            "UPDATE clases SET reservas_count = GREATEST(reservas_count - 1, 0) WHERE id = $1",
        )
        .bind(reserva.clase_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error liberando lugar: {}", e)))?;

        if let Some(espacio) = reserva.espacio_id {
            sqlx::query("UPDATE espacios SET estado = 'disponible' WHERE id = $1")
                .bind(espacio)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::Database(format!("Error liberando espacio: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error en commit: {}", e)))?;

        Ok(Some(reserva))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reserva>, AppError> {
        let reserva = sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando reserva: {}", e)))?;

        Ok(reserva)
    }

    /// ¿El cliente ya tiene una reserva confirmada para esta clase?
    pub async fn tiene_confirmada(
        &self,
        clase_id: Uuid,
        cliente_id: Uuid,
    ) -> Result<bool, AppError> {
        let existe: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservas
                WHERE clase_id = $1 AND cliente_id = $2 AND estado = 'confirmada'
            )
            "#,
        )
        .bind(clase_id)
        .bind(cliente_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error verificando reserva existente: {}", e)))?;

        Ok(existe.0)
    }

    pub async fn mis_reservas(
        &self,
        cliente_id: Uuid,
        estado: Option<ReservaEstado>,
    ) -> Result<Vec<ReservaDetalle>, AppError> {
        let reservas = sqlx::query_as::<_, ReservaDetalle>(
            r#"
            SELECT r.id, r.clase_id, r.cliente_id, r.espacio_id, e.numero AS numero_espacio,
                   r.estado, r.razon_cancelacion, r.cancelacion_tardia,
                   c.fecha_hora, c.nombre_clase,
                   d.nombre AS nombre_disciplina, s.nombre AS nombre_salon,
                   p.nombre_completo AS nombre_coach,
                   r.created_at
            FROM reservas r
            JOIN clases c ON c.id = r.clase_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            JOIN salones s ON s.id = c.salon_id
            LEFT JOIN perfiles p ON p.id = c.coach_id
            LEFT JOIN espacios e ON e.id = r.espacio_id
            WHERE r.cliente_id = $1
              AND ($2::reserva_estado IS NULL OR r.estado = $2)
            ORDER BY c.fecha_hora DESC
            "#,
        )
        .bind(cliente_id)
        .bind(estado)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando reservas: {}", e)))?;

        Ok(reservas)
    }

    pub async fn listar_por_clase(&self, clase_id: Uuid) -> Result<Vec<ReservaDetalle>, AppError> {
        let reservas = sqlx::query_as::<_, ReservaDetalle>(
            r#"
            SELECT r.id, r.clase_id, r.cliente_id, r.espacio_id, e.numero AS numero_espacio,
                   r.estado, r.razon_cancelacion, r.cancelacion_tardia,
                   c.fecha_hora, c.nombre_clase,
                   d.nombre AS nombre_disciplina, s.nombre AS nombre_salon,
                   p.nombre_completo AS nombre_coach,
                   r.created_at
            FROM reservas r
            JOIN clases c ON c.id = r.clase_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            JOIN salones s ON s.id = c.salon_id
            LEFT JOIN perfiles p ON p.id = c.coach_id
            LEFT JOIN espacios e ON e.id = r.espacio_id
            WHERE r.clase_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(clase_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando reservas de la clase: {}", e)))?;

        Ok(reservas)
    }

    /// Cancelar en bloque las reservas confirmadas de una clase cancelada
    /// y liberar sus espacios. No descuenta reservas_count: la clase ya
    /// no acepta reservas.
    pub async fn cancelar_por_clase(&self, clase_id: Uuid) -> Result<Vec<Reserva>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error abriendo transacción: {}", e)))?;

        let reservas = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas
            SET estado = 'cancelada', razon_cancelacion = 'clase_cancelada'
            WHERE clase_id = $1 AND estado = 'confirmada'
            RETURNING *
            "#,
        )
        .bind(clase_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error cancelando reservas: {}", e)))?;

        sqlx::query(
            r#"
            UPDATE espacios SET estado = 'disponible'
            WHERE estado = 'ocupado'
              AND id IN (SELECT espacio_id FROM reservas
                         WHERE clase_id = $1 AND espacio_id IS NOT NULL)
            "#,
        )
        .bind(clase_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error liberando espacios: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error en commit: {}", e)))?;

        Ok(reservas)
    }

    pub async fn completar_confirmadas(&self, clase_id: Uuid) -> Result<Vec<Reserva>, AppError> {
        let reservas = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas
            SET estado = 'completada'
            WHERE clase_id = $1 AND estado = 'confirmada'
            RETURNING *
            "#,
        )
        .bind(clase_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error completando reservas: {}", e)))?;

        Ok(reservas)
    }

    // --- Lista de espera ---

    pub async fn agregar_lista_espera(
        &self,
        clase_id: Uuid,
        cliente_id: Uuid,
    ) -> Result<ListaEspera, AppError> {
        let entrada = sqlx::query_as::<_, ListaEspera>(
            r#"
            INSERT INTO lista_espera (id, clase_id, cliente_id, posicion, notificado, created_at)
            VALUES ($1, $2, $3,
                    (SELECT COALESCE(MAX(posicion), 0) + 1 FROM lista_espera WHERE clase_id = $2),
                    FALSE, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(clase_id)
        .bind(cliente_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error agregando a lista de espera: {}", e)))?;

        Ok(entrada)
    }

    pub async fn en_lista_espera(
        &self,
        clase_id: Uuid,
        cliente_id: Uuid,
    ) -> Result<bool, AppError> {
        let existe: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM lista_espera WHERE clase_id = $1 AND cliente_id = $2)",
        )
        .bind(clase_id)
        .bind(cliente_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error verificando lista de espera: {}", e)))?;

        Ok(existe.0)
    }

    /// Primera entrada FIFO aún no avisada de que se liberó un lugar
    pub async fn primera_sin_notificar(
        &self,
        clase_id: Uuid,
    ) -> Result<Option<ListaEspera>, AppError> {
        let entrada = sqlx::query_as::<_, ListaEspera>(
            r#"
            SELECT * FROM lista_espera
            WHERE clase_id = $1 AND notificado = FALSE
            ORDER BY posicion ASC
            LIMIT 1
            "#,
        )
        .bind(clase_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error buscando lista de espera: {}", e)))?;

        Ok(entrada)
    }

    pub async fn marcar_notificado(&self, lista_espera_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE lista_espera SET notificado = TRUE WHERE id = $1")
            .bind(lista_espera_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error marcando notificado: {}", e)))?;

        Ok(())
    }
}
