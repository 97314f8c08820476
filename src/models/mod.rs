//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod clase;
pub mod documento;
pub mod espacio;
pub mod invitacion;
pub mod notificacion;
pub mod perfil;
pub mod personal;
pub mod reserva;
pub mod salon;
pub mod solicitud;
