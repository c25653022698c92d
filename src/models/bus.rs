//! Modelo de Bus
//! 
//! Este módulo contiene el struct Bus y su estado de tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de tracking del bus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BusStatus {
    Online,
    Offline,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Online => "online",
            BusStatus::Offline => "offline",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, BusStatus::Online)
    }

    /// Estado opuesto, usado por el toggle del conductor
    pub fn toggled(&self) -> Self {
        match self {
            BusStatus::Online => BusStatus::Offline,
            BusStatus::Offline => BusStatus::Online,
        }
    }
}

impl std::fmt::Display for BusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bus de la flota
///
/// `route_id` y `driver_id` son referencias por identificador; pueden quedar
/// colgando y se resuelven bajo demanda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: String,
    pub number: String,
    pub route_id: String,
    pub driver_id: String,
    pub status: BusStatus,
    pub capacity: u32,
    pub lat: f64,
    pub lng: f64,
    pub last_updated: DateTime<Utc>,
}

impl Bus {
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle() {
        assert_eq!(BusStatus::Online.toggled(), BusStatus::Offline);
        assert_eq!(BusStatus::Offline.toggled(), BusStatus::Online);
        assert!(!BusStatus::Online.toggled().is_online());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&BusStatus::Online).unwrap(), "\"online\"");
        let status: BusStatus = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(status, BusStatus::Offline);
    }
}
