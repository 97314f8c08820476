//! Servicios
//!
//! Colaboradores transversales usados por los controllers.

pub mod almacenamiento_service;
pub mod notificacion_service;
