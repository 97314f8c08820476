//! DTOs de reservas

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reserva::{ListaEspera, Reserva, ReservaEstado};

/// Request para crear una reserva
#[derive(Debug, Deserialize)]
pub struct CrearReservaRequest {
    pub clase_id: Uuid,
    pub espacio_id: Option<Uuid>,
}

/// Request para cancelar una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CancelarReservaRequest {
    #[validate(length(max = 300))]
    pub razon: Option<String>,
}

/// Filtros para "mis reservas"
#[derive(Debug, Deserialize)]
pub struct ReservaFiltros {
    pub estado: Option<ReservaEstado>,
}

/// Resultado de crear una reserva: o quedó confirmada, o la clase
/// estaba llena y el cliente entró a la lista de espera.
#[derive(Debug, Serialize)]
pub struct ResultadoReserva {
    pub en_lista_espera: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserva: Option<Reserva>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lista_espera: Option<ListaEspera>,
}

/// Resultado de cancelar una reserva
#[derive(Debug, Serialize)]
pub struct ResultadoCancelacion {
    pub reserva: Reserva,
    /// true cuando se canceló a menos de la ventana de penalización
    /// (la penalización de un crédito extra se cobra a nivel negocio,
    /// no en esta capa)
    pub cancelacion_tardia: bool,
}
