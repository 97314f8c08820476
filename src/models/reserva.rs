//! Modelo de Reserva
//!
//! Reservas de clientes contra una clase y entradas de lista de espera.
//! Una reserva nunca se elimina físicamente; solo cambia de estado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM reserva_estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "reserva_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservaEstado {
    Confirmada,
    Cancelada,
    Completada,
    NoShow,
}

/// Reserva - mapea exactamente a la tabla reservas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reserva {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub cliente_id: Uuid,
    pub espacio_id: Option<Uuid>,
    pub estado: ReservaEstado,
    pub razon_cancelacion: Option<String>,
    pub cancelacion_tardia: bool,
    pub created_at: DateTime<Utc>,
}

/// Reserva con la información de la clase resuelta, para "mis reservas"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservaDetalle {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub cliente_id: Uuid,
    pub espacio_id: Option<Uuid>,
    pub numero_espacio: Option<i32>,
    pub estado: ReservaEstado,
    pub razon_cancelacion: Option<String>,
    pub cancelacion_tardia: bool,
    pub fecha_hora: DateTime<Utc>,
    pub nombre_clase: Option<String>,
    pub nombre_disciplina: String,
    pub nombre_salon: String,
    pub nombre_coach: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entrada de lista de espera - mapea a la tabla lista_espera
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListaEspera {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub cliente_id: Uuid,
    pub posicion: i32,
    pub notificado: bool,
    pub created_at: DateTime<Utc>,
}
