//! Almacén en memoria de la flota
//! 
//! Tablas de entidades y el proveedor de datos semilla.

pub mod fleet_store;
pub mod seed;

pub use fleet_store::*;
pub use seed::*;
