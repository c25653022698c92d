//! Modelo de Route

use serde::{Deserialize, Serialize};

/// Ruta de la flota. Inmutable una vez creada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub number: String,
    pub name: String,
    /// Paradas en orden: la primera es el origen, la última la terminal
    pub stops: Vec<String>,
}

impl Route {
    pub fn origin(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    pub fn terminus(&self) -> Option<&str> {
        self.stops.last().map(String::as_str)
    }
}
