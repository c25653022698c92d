//! Services module
//! 
//! Este módulo contiene la lógica del núcleo: resolución de relaciones,
//! simulación de posiciones, operaciones compuestas de flota y el gate
//! de sesión.

pub mod fleet_service;
pub mod position_simulator;
pub mod relationship_resolver;
pub mod session_service;

pub use position_simulator::{PositionSimulator, SimulatorHandle};
pub use session_service::{Session, SessionError, SessionState, SharedSession};
