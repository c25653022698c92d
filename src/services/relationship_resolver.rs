//! Resolución de relaciones entre entidades
//!
//! Funciones puras y totales sobre un `FleetStore`. Una referencia que no
//! resuelve devuelve `None`; ninguna de estas funciones falla.

use serde::Serialize;

use crate::models::{Bus, Driver, Route};
use crate::store::FleetStore;

/// Texto que muestra la capa de presentación cuando algo no resuelve
pub const NOT_AVAILABLE: &str = "N/A";

/// Contadores del dashboard del manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_buses: usize,
    pub total_routes: usize,
    pub live_buses: usize,
    pub offline_buses: usize,
}

/// Número de buses asignados a una ruta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLoad {
    pub route_id: String,
    pub route_number: String,
    pub bus_count: usize,
}

pub fn route_of<'a>(store: &'a FleetStore, bus: &Bus) -> Option<&'a Route> {
    store.route(&bus.route_id)
}

pub fn driver_of<'a>(store: &'a FleetStore, bus: &Bus) -> Option<&'a Driver> {
    store.driver(&bus.driver_id)
}

/// Buses asignados a la ruta, en orden de tabla
pub fn buses_on_route<'a>(store: &'a FleetStore, route: &Route) -> Vec<&'a Bus> {
    store.buses().iter().filter(|b| b.route_id == route.id).collect()
}

pub fn buses_online_count(store: &FleetStore) -> usize {
    store.buses().iter().filter(|b| b.is_online()).count()
}

pub fn buses_offline_count(store: &FleetStore) -> usize {
    store.buses().iter().filter(|b| !b.is_online()).count()
}

/// Búsqueda del pasajero: el primer bus cuya ruta tenga exactamente ese
/// número, o cuyo propio número contenga la consulta. Gana el primero en
/// orden de tabla.
pub fn find_bus_by_route_number_or_bus_number<'a>(store: &'a FleetStore, query: &str) -> Option<&'a Bus> {
    store.buses().iter().find(|bus| {
        route_of(store, bus).map_or(false, |route| route.number == query) || bus.number.contains(query)
    })
}

/// Bus que conduce el conductor (primer bus cuyo `driver_id` coincide)
pub fn bus_of_driver<'a>(store: &'a FleetStore, driver_id: &str) -> Option<&'a Bus> {
    store.buses().iter().find(|b| b.driver_id == driver_id)
}

/// Primer bus en línea de la ruta
pub fn first_online_bus_on_route<'a>(store: &'a FleetStore, route: &Route) -> Option<&'a Bus> {
    store.buses().iter().find(|b| b.route_id == route.id && b.is_online())
}

pub fn fleet_stats(store: &FleetStore) -> FleetStats {
    let live_buses = buses_online_count(store);
    FleetStats {
        total_buses: store.buses().len(),
        total_routes: store.routes().len(),
        live_buses,
        offline_buses: store.buses().len() - live_buses,
    }
}

/// Carga por ruta, en orden de la tabla de rutas
pub fn route_load(store: &FleetStore) -> Vec<RouteLoad> {
    store
        .routes()
        .iter()
        .map(|route| RouteLoad {
            route_id: route.id.clone(),
            route_number: route.number.clone(),
            bus_count: buses_on_route(store, route).len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BusStatus;
    use chrono::Utc;

    fn bus(id: &str, number: &str, route_id: &str, driver_id: &str, status: BusStatus) -> Bus {
        Bus {
            id: id.to_string(),
            number: number.to_string(),
            route_id: route_id.to_string(),
            driver_id: driver_id.to_string(),
            status,
            capacity: 40,
            lat: 40.7128,
            lng: -74.0060,
            last_updated: Utc::now(),
        }
    }

    fn route(id: &str, number: &str) -> Route {
        Route {
            id: id.to_string(),
            number: number.to_string(),
            name: format!("Route {}", number),
            stops: vec!["A".to_string(), "B".to_string()],
        }
    }

    fn driver(id: &str) -> Driver {
        Driver {
            id: id.to_string(),
            name: format!("Driver {}", id),
            phone: "+1 555-0000".to_string(),
            bus_id: String::new(),
        }
    }

    fn store() -> FleetStore {
        FleetStore::new(
            vec![route("r1", "101"), route("r2", "102")],
            vec![driver("d1"), driver("d2"), driver("d3")],
            vec![
                bus("b1", "EDU-100", "r1", "d1", BusStatus::Offline),
                bus("b2", "EDU-101", "r2", "d2", BusStatus::Online),
                bus("b3", "EDU-102", "r1", "d3", BusStatus::Online),
                bus("b4", "EDU-103", "r404", "d404", BusStatus::Offline),
            ],
        )
    }

    #[test]
    fn test_route_and_driver_resolution() {
        let store = store();
        let b1 = store.bus("b1").unwrap();
        assert_eq!(route_of(&store, b1).map(|r| r.id.as_str()), Some("r1"));
        assert_eq!(driver_of(&store, b1).map(|d| d.id.as_str()), Some("d1"));
    }

    #[test]
    fn test_dangling_references_resolve_to_none() {
        let store = store();
        let b4 = store.bus("b4").unwrap();
        assert!(route_of(&store, b4).is_none());
        assert!(driver_of(&store, b4).is_none());
    }

    #[test]
    fn test_buses_on_route_keeps_table_order() {
        let store = store();
        let r1 = store.route("r1").unwrap();
        let ids: Vec<&str> = buses_on_route(&store, r1).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3"]);
    }

    #[test]
    fn test_counts_partition_fleet() {
        let store = store();
        assert_eq!(buses_online_count(&store), 2);
        assert_eq!(buses_offline_count(&store), 2);
        assert_eq!(buses_online_count(&store) + buses_offline_count(&store), store.buses().len());
    }

    #[test]
    fn test_find_by_route_number() {
        let store = store();
        let found = find_bus_by_route_number_or_bus_number(&store, "101").unwrap();
        assert_eq!(found.id, "b1");
    }

    #[test]
    fn test_find_by_bus_number_substring() {
        let store = store();
        let found = find_bus_by_route_number_or_bus_number(&store, "-102").unwrap();
        assert_eq!(found.id, "b3");
        assert!(find_bus_by_route_number_or_bus_number(&store, "999").is_none());
    }

    #[test]
    fn test_find_first_match_wins() {
        let store = store();
        // "102" coincide con la ruta de b2 y con el número de b3; b2 va primero
        let found = find_bus_by_route_number_or_bus_number(&store, "102").unwrap();
        assert_eq!(found.id, "b2");
    }

    #[test]
    fn test_empty_query_matches_first_bus() {
        let store = store();
        let found = find_bus_by_route_number_or_bus_number(&store, "").unwrap();
        assert_eq!(found.id, "b1");
        assert!(find_bus_by_route_number_or_bus_number(&FleetStore::default(), "").is_none());
    }

    #[test]
    fn test_bus_of_driver_and_active_bus() {
        let store = store();
        assert_eq!(bus_of_driver(&store, "d3").map(|b| b.id.as_str()), Some("b3"));
        assert!(bus_of_driver(&store, "d99").is_none());

        let r1 = store.route("r1").unwrap();
        assert_eq!(first_online_bus_on_route(&store, r1).map(|b| b.id.as_str()), Some("b3"));
    }

    #[test]
    fn test_stats_and_route_load() {
        let store = store();
        let stats = fleet_stats(&store);
        assert_eq!(
            stats,
            FleetStats { total_buses: 4, total_routes: 2, live_buses: 2, offline_buses: 2 }
        );

        let load = route_load(&store);
        assert_eq!(load.len(), 2);
        assert_eq!(load[0].route_number, "101");
        assert_eq!(load[0].bus_count, 2);
        assert_eq!(load[1].bus_count, 1);
    }
}
