//! Modelos del sistema
//! 
//! Este módulo contiene las entidades de la flota (buses, rutas, conductores)
//! y el usuario de la sesión activa. Todas viven en memoria: no hay schema
//! ni persistencia detrás.

pub mod bus;
pub mod driver;
pub mod route;
pub mod user;

pub use bus::*;
pub use driver::*;
pub use route::*;
pub use user::*;
