use serde::{Deserialize, Serialize};

use crate::models::{Bus, BusStatus, Driver, Route};
use crate::services::relationship_resolver::{FleetStats, RouteLoad, NOT_AVAILABLE};

// Request para cambiar el estado de un bus
#[derive(Debug, Deserialize)]
pub struct UpdateBusStatusRequest {
    pub status: BusStatus,
}

// Query de búsqueda del pasajero
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// Resultado de una mutación: los ids desconocidos son no-op, no error
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse<T> {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<T>,
}

// Ficha de bus con su ruta y conductor resueltos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusDetailResponse {
    pub bus: Bus,
    pub route: Option<Route>,
    pub driver: Option<Driver>,
    pub route_label: String,
    pub driver_label: String,
}

impl BusDetailResponse {
    pub fn new(bus: Bus, route: Option<Route>, driver: Option<Driver>) -> Self {
        let route_label = route
            .as_ref()
            .map(|r| format!("{} - {}", r.number, r.name))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let driver_label = driver
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Unassigned".to_string());
        Self { bus, route, driver, route_label, driver_label }
    }
}

// Ficha de ruta con sus buses asignados
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetailResponse {
    pub route: Route,
    pub origin: Option<String>,
    pub terminus: Option<String>,
    pub assigned_buses: Vec<Bus>,
}

impl RouteDetailResponse {
    pub fn new(route: Route, assigned_buses: Vec<Bus>) -> Self {
        Self {
            origin: route.origin().map(str::to_string),
            terminus: route.terminus().map(str::to_string),
            route,
            assigned_buses,
        }
    }
}

// Dashboard del manager
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatsResponse {
    #[serde(flatten)]
    pub stats: FleetStats,
    pub route_load: Vec<RouteLoad>,
}

// Asignación del conductor en sesión
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAssignmentResponse {
    pub driver_id: String,
    pub bus: Option<Bus>,
    pub route: Option<Route>,
    pub tracking: bool,
}

// Request del toggle de tracking
#[derive(Debug, Deserialize)]
pub struct TrackingRequest {
    pub status: BusStatus,
}
