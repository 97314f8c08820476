//! DTOs de la API
//!
//! Requests y responses de cada recurso, más la respuesta genérica.

pub mod auth_dto;
pub mod clase_dto;
pub mod comun;
pub mod inventario_dto;
pub mod onboarding_dto;
pub mod personal_dto;
pub mod reserva_dto;
pub mod solicitud_dto;
