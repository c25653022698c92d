//! Almacén de entidades de la flota
//!
//! Tablas en memoria de buses, rutas y conductores. Conservan el orden de
//! inserción, que es el orden de iteración que usan las búsquedas. Toda
//! mutación pasa por los métodos de este tipo.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::{Bus, BusStatus, Driver, DriverPatch, Route};

/// Handle compartido del almacén entre el simulador y la API
pub type SharedFleetStore = Arc<RwLock<FleetStore>>;

/// Copia de solo lectura de las tres tablas para la capa de presentación
#[derive(Debug, Clone, Serialize)]
pub struct FleetSnapshot {
    pub buses: Vec<Bus>,
    pub routes: Vec<Route>,
    pub drivers: Vec<Driver>,
}

/// Referencia de un bus que no resuelve a ninguna fila
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    Route { bus_id: String, route_id: String },
    Driver { bus_id: String, driver_id: String },
}

#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    buses: Vec<Bus>,
    routes: Vec<Route>,
    drivers: Vec<Driver>,
}

impl FleetStore {
    /// Crear el almacén a partir de las tablas semilla.
    ///
    /// Las referencias colgantes se toleran: se registran como warning y se
    /// resuelven como "no encontrado" en las consultas.
    pub fn new(routes: Vec<Route>, drivers: Vec<Driver>, buses: Vec<Bus>) -> Self {
        let store = Self { buses, routes, drivers };
        for dangling in store.dangling_references() {
            warn!("⚠️ Referencia colgante en datos semilla: {:?}", dangling);
        }
        store
    }

    pub fn into_shared(self) -> SharedFleetStore {
        Arc::new(RwLock::new(self))
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn bus(&self, bus_id: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.id == bus_id)
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn driver(&self, driver_id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == driver_id)
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            buses: self.buses.clone(),
            routes: self.routes.clone(),
            drivers: self.drivers.clone(),
        }
    }

    /// Referencias de buses a rutas o conductores inexistentes
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for bus in &self.buses {
            if self.route(&bus.route_id).is_none() {
                dangling.push(DanglingReference::Route {
                    bus_id: bus.id.clone(),
                    route_id: bus.route_id.clone(),
                });
            }
            if self.driver(&bus.driver_id).is_none() {
                dangling.push(DanglingReference::Driver {
                    bus_id: bus.id.clone(),
                    driver_id: bus.driver_id.clone(),
                });
            }
        }
        dangling
    }

    /// Cambiar el estado de un bus. Id desconocido: no-op silencioso.
    ///
    /// No toca coordenadas ni `last_updated`; el siguiente tick del
    /// simulador recoge el nuevo estado. Devuelve si el bus existía.
    pub fn set_bus_status(&mut self, bus_id: &str, status: BusStatus) -> bool {
        match self.buses.iter_mut().find(|b| b.id == bus_id) {
            Some(bus) => {
                debug!("🚌 Bus {}: {} -> {}", bus.id, bus.status, status);
                bus.status = status;
                true
            }
            None => {
                debug!("🔍 set_bus_status ignorado, bus '{}' no existe", bus_id);
                false
            }
        }
    }

    /// Aplicar un patch parcial a un conductor. Id desconocido: no-op.
    pub fn patch_driver(&mut self, driver_id: &str, patch: DriverPatch) -> bool {
        match self.drivers.iter_mut().find(|d| d.id == driver_id) {
            Some(driver) => {
                debug!("👤 Patch de conductor {}: {:?}", driver.id, patch);
                driver.apply(patch);
                true
            }
            None => {
                debug!("🔍 patch_driver ignorado, conductor '{}' no existe", driver_id);
                false
            }
        }
    }

    /// Acceso mutable a los buses en línea, reservado al simulador
    pub(crate) fn online_buses_mut(&mut self) -> impl Iterator<Item = &mut Bus> {
        self.buses.iter_mut().filter(|b| b.is_online())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bus(id: &str, route_id: &str, driver_id: &str, status: BusStatus) -> Bus {
        Bus {
            id: id.to_string(),
            number: format!("EDU-{}", id),
            route_id: route_id.to_string(),
            driver_id: driver_id.to_string(),
            status,
            capacity: 40,
            lat: 40.7128,
            lng: -74.0060,
            last_updated: Utc::now(),
        }
    }

    fn store() -> FleetStore {
        let routes = vec![Route {
            id: "r1".to_string(),
            number: "101".to_string(),
            name: "Downtown Express".to_string(),
            stops: vec!["Main Square".to_string(), "Hostel A".to_string()],
        }];
        let drivers = vec![
            Driver {
                id: "d1".to_string(),
                name: "Driver A".to_string(),
                phone: "+1 555-01010".to_string(),
                bus_id: "b1".to_string(),
            },
            Driver {
                id: "d2".to_string(),
                name: "Driver B".to_string(),
                phone: "+1 555-01011".to_string(),
                bus_id: "b2".to_string(),
            },
        ];
        let buses = vec![
            bus("b1", "r1", "d1", BusStatus::Online),
            bus("b2", "r9", "d2", BusStatus::Offline),
        ];
        FleetStore::new(routes, drivers, buses)
    }

    #[test]
    fn test_set_bus_status_is_idempotent() {
        let mut store = store();
        assert!(store.set_bus_status("b2", BusStatus::Online));
        let once = store.snapshot().buses;
        assert!(store.set_bus_status("b2", BusStatus::Online));
        assert_eq!(store.snapshot().buses, once);
    }

    #[test]
    fn test_set_bus_status_leaves_position_untouched() {
        let mut store = store();
        let before = store.bus("b1").cloned().unwrap();
        store.set_bus_status("b1", BusStatus::Offline);
        let after = store.bus("b1").unwrap();
        assert_eq!(after.status, BusStatus::Offline);
        assert_eq!(after.lat, before.lat);
        assert_eq!(after.lng, before.lng);
        assert_eq!(after.last_updated, before.last_updated);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = store();
        let before = store.snapshot();
        assert!(!store.set_bus_status("b99", BusStatus::Online));
        assert!(!store.patch_driver("d99", DriverPatch { name: Some("X".to_string()), phone: None }));
        let after = store.snapshot();
        assert_eq!(after.buses, before.buses);
        assert_eq!(after.drivers, before.drivers);
    }

    #[test]
    fn test_patch_driver_only_touches_target() {
        let mut store = store();
        store.patch_driver("d1", DriverPatch { name: None, phone: Some("+1 555-9999".to_string()) });
        let d1 = store.driver("d1").unwrap();
        assert_eq!(d1.phone, "+1 555-9999");
        assert_eq!(d1.name, "Driver A");
        assert_eq!(store.driver("d2").unwrap().phone, "+1 555-01011");
    }

    #[test]
    fn test_dangling_references_are_reported() {
        let store = store();
        assert_eq!(
            store.dangling_references(),
            vec![DanglingReference::Route { bus_id: "b2".to_string(), route_id: "r9".to_string() }]
        );
    }
}
