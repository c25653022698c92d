use crate::dto::fleet_dto::{
    BusDetailResponse, DriverAssignmentResponse, FleetStatsResponse, MutationResponse,
    RouteDetailResponse,
};
use crate::models::{Bus, BusStatus, Capability, Driver, DriverPatch, User};
use crate::services::fleet_service::{self, BusEdit, BusEditOutcome};
use crate::services::relationship_resolver as resolver;
use crate::services::session_service::SharedSession;
use crate::store::{FleetSnapshot, SharedFleetStore};
use crate::utils::errors::{not_found_error, AppResult};

pub struct FleetController {
    store: SharedFleetStore,
    session: SharedSession,
}

impl FleetController {
    pub fn new(store: SharedFleetStore, session: SharedSession) -> Self {
        Self { store, session }
    }

    /// Usuario en sesión con la capacidad pedida
    async fn require(&self, capability: Capability) -> AppResult<User> {
        let session = self.session.read().await;
        let user = session.require(capability)?.clone();
        Ok(user)
    }

    pub async fn snapshot(&self) -> AppResult<FleetSnapshot> {
        self.require(Capability::ViewFleet).await?;
        Ok(self.store.read().await.snapshot())
    }

    /// Búsqueda del pasajero; sin coincidencia devuelve `None`
    pub async fn search(&self, query: &str) -> AppResult<Option<BusDetailResponse>> {
        self.require(Capability::SearchBuses).await?;
        let store = self.store.read().await;
        Ok(resolver::find_bus_by_route_number_or_bus_number(&store, query).map(|bus| {
            BusDetailResponse::new(
                bus.clone(),
                resolver::route_of(&store, bus).cloned(),
                resolver::driver_of(&store, bus).cloned(),
            )
        }))
    }

    pub async fn bus_detail(&self, bus_id: &str) -> AppResult<BusDetailResponse> {
        self.require(Capability::ViewFleet).await?;
        let store = self.store.read().await;
        let bus = store.bus(bus_id).ok_or_else(|| not_found_error("Bus", bus_id))?;
        Ok(BusDetailResponse::new(
            bus.clone(),
            resolver::route_of(&store, bus).cloned(),
            resolver::driver_of(&store, bus).cloned(),
        ))
    }

    pub async fn route_detail(&self, route_id: &str) -> AppResult<RouteDetailResponse> {
        self.require(Capability::ViewFleet).await?;
        let store = self.store.read().await;
        let route = store.route(route_id).ok_or_else(|| not_found_error("Route", route_id))?;
        let assigned = resolver::buses_on_route(&store, route).into_iter().cloned().collect();
        Ok(RouteDetailResponse::new(route.clone(), assigned))
    }

    /// Primer bus en línea de la ruta; `None` si no hay ninguno
    pub async fn active_bus_on_route(&self, route_id: &str) -> AppResult<Option<Bus>> {
        self.require(Capability::SearchBuses).await?;
        let store = self.store.read().await;
        let route = store.route(route_id).ok_or_else(|| not_found_error("Route", route_id))?;
        Ok(resolver::first_online_bus_on_route(&store, route).cloned())
    }

    pub async fn stats(&self) -> AppResult<FleetStatsResponse> {
        self.require(Capability::ViewStats).await?;
        let store = self.store.read().await;
        Ok(FleetStatsResponse {
            stats: resolver::fleet_stats(&store),
            route_load: resolver::route_load(&store),
        })
    }

    pub async fn set_bus_status(&self, bus_id: &str, status: BusStatus) -> AppResult<MutationResponse<Bus>> {
        self.require(Capability::SetBusStatus).await?;
        let mut store = self.store.write().await;
        let applied = store.set_bus_status(bus_id, status);
        Ok(MutationResponse { applied, entity: store.bus(bus_id).cloned() })
    }

    pub async fn patch_driver(&self, driver_id: &str, patch: DriverPatch) -> AppResult<MutationResponse<Driver>> {
        self.require(Capability::PatchDriver).await?;
        let mut store = self.store.write().await;
        let applied = store.patch_driver(driver_id, patch);
        Ok(MutationResponse { applied, entity: store.driver(driver_id).cloned() })
    }

    pub async fn save_bus_edit(&self, bus_id: &str, edit: BusEdit) -> AppResult<BusEditOutcome> {
        self.require(Capability::SetBusStatus).await?;
        self.require(Capability::PatchDriver).await?;
        let mut store = self.store.write().await;
        fleet_service::apply_bus_edit(&mut store, bus_id, edit).ok_or_else(|| not_found_error("Bus", bus_id))
    }

    pub async fn my_assignment(&self) -> AppResult<DriverAssignmentResponse> {
        let user = self.require(Capability::ViewAssignment).await?;
        let store = self.store.read().await;
        let bus = resolver::bus_of_driver(&store, &user.id);
        let route = bus.and_then(|b| resolver::route_of(&store, b));
        Ok(DriverAssignmentResponse {
            driver_id: user.id.clone(),
            tracking: bus.map_or(false, |b| b.is_online()),
            bus: bus.cloned(),
            route: route.cloned(),
        })
    }

    pub async fn set_my_tracking(&self, status: BusStatus) -> AppResult<MutationResponse<Bus>> {
        let user = self.require(Capability::ToggleOwnTracking).await?;
        let mut store = self.store.write().await;
        let bus_id = fleet_service::set_driver_tracking(&mut store, &user.id, status);
        let entity = bus_id.as_deref().and_then(|id| store.bus(id)).cloned();
        Ok(MutationResponse { applied: bus_id.is_some(), entity })
    }
}
