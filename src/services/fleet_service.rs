//! Operaciones compuestas sobre la flota
//!
//! Combinan el resolver con la API de mutación: el toggle de tracking del
//! conductor y el guardado de la ficha de bus del manager.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{BusStatus, DriverPatch};
use crate::store::FleetStore;

use super::relationship_resolver::{bus_of_driver, driver_of};

/// Edición de la ficha de un bus por el manager
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEdit {
    pub status: BusStatus,
    pub driver_name: String,
    pub driver_phone: String,
}

/// Qué cambió al guardar una ficha
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEditOutcome {
    pub bus_id: String,
    pub status_changed: bool,
    /// Conductor actualizado, si el bus tenía uno que resolviera
    pub driver_id: Option<String>,
}

/// Guardar la ficha: el estado solo se escribe si cambia, y el conductor
/// del bus recibe nombre y teléfono si resuelve. Bus desconocido: `None`.
pub fn apply_bus_edit(store: &mut FleetStore, bus_id: &str, edit: BusEdit) -> Option<BusEditOutcome> {
    let bus = store.bus(bus_id)?;
    let status_changed = bus.status != edit.status;
    let driver_id = driver_of(store, bus).map(|d| d.id.clone());

    if status_changed {
        store.set_bus_status(bus_id, edit.status);
    }
    if let Some(driver_id) = &driver_id {
        store.patch_driver(
            driver_id,
            DriverPatch {
                name: Some(edit.driver_name),
                phone: Some(edit.driver_phone),
            },
        );
    }

    info!(
        "📝 Ficha de bus {} guardada (estado cambiado: {}, conductor: {:?})",
        bus_id, status_changed, driver_id
    );
    Some(BusEditOutcome {
        bus_id: bus_id.to_string(),
        status_changed,
        driver_id,
    })
}

/// Encender o apagar el tracking del bus del conductor.
/// Devuelve el id del bus afectado; `None` si el conductor no tiene bus.
pub fn set_driver_tracking(store: &mut FleetStore, driver_id: &str, status: BusStatus) -> Option<String> {
    let bus_id = bus_of_driver(store, driver_id)?.id.clone();
    store.set_bus_status(&bus_id, status);
    info!("📡 Tracking de {} ({}) -> {}", bus_id, driver_id, status);
    Some(bus_id)
}
