//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: el almacén de la flota y la sesión activa.
//! El handle del simulador no vive aquí; lo posee `main` para poder
//! detenerlo al apagar.

use crate::config::environment::EnvironmentConfig;
use crate::services::session_service::{Session, SharedSession};
use crate::store::{FleetStore, SharedFleetStore};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: SharedFleetStore,
    pub session: SharedSession,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: FleetStore) -> Self {
        Self {
            config,
            store: store.into_shared(),
            session: Session::new().into_shared(),
        }
    }
}
