//! Controllers
//!
//! Lógica de negocio de cada dominio; las rutas solo traducen HTTP.

pub mod clase_controller;
pub mod inventario_controller;
pub mod notificacion_controller;
pub mod onboarding_controller;
pub mod personal_controller;
pub mod reserva_controller;
pub mod solicitud_controller;
