//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración del servidor, de la simulación
//! de posiciones y de los datos semilla de la flota.

pub mod environment;
pub mod simulation;

pub use environment::*;
pub use simulation::*;
