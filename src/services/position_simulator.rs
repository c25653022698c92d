//! Simulador de posiciones GPS
//!
//! Tarea recurrente que desplaza cada bus en línea un delta aleatorio en
//! cada tick. `PositionSimulator::start` devuelve un `SimulatorHandle` que
//! debe detenerse con `stop`; si el handle se descarta sin detenerlo, la
//! tarea se aborta igualmente.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::store::{FleetStore, SharedFleetStore};

/// Aplicar un tick sobre el almacén.
///
/// Cada bus en línea recibe `lat + δ`, `lng + δ` con δ uniforme e
/// independiente en `[-max_step, max_step]`, y `last_updated` pasa a `now`
/// (o a un milisegundo después del sello anterior si el reloj no avanzó).
/// Los buses fuera de línea no se tocan. Devuelve cuántos buses se movieron.
pub fn apply_tick<R: Rng>(store: &mut FleetStore, rng: &mut R, max_step: f64, now: DateTime<Utc>) -> usize {
    let mut moved = 0;
    for bus in store.online_buses_mut() {
        bus.lat += rng.gen_range(-max_step..=max_step);
        bus.lng += rng.gen_range(-max_step..=max_step);
        bus.last_updated = if now > bus.last_updated {
            now
        } else {
            bus.last_updated + ChronoDuration::milliseconds(1)
        };
        moved += 1;
    }
    moved
}

pub struct PositionSimulator {
    store: SharedFleetStore,
    config: SimulationConfig,
}

impl PositionSimulator {
    pub fn new(store: SharedFleetStore, config: SimulationConfig) -> Self {
        Self { store, config }
    }

    /// Lanzar la tarea recurrente. El primer tick llega un intervalo
    /// completo después del arranque.
    pub fn start(self) -> SimulatorHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let Self { store, config } = self;

        info!(
            "🛰️ Simulador de posiciones iniciado (intervalo {:?}, paso máximo {})",
            config.tick_interval, config.max_step
        );

        let join = tokio::spawn(async move {
            let mut rng = match config.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let start = time::Instant::now() + config.tick_interval;
            let mut ticker = time::interval_at(start, config.tick_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks: u64 = 0;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let mut guard = store.write().await;
                        let moved = apply_tick(&mut guard, &mut rng, config.max_step, Utc::now());
                        drop(guard);
                        ticks += 1;
                        debug!("📍 Tick {}: {} buses en línea desplazados", ticks, moved);
                    }
                }
            }

            ticks
        });

        SimulatorHandle {
            stop_tx: Some(stop_tx),
            join: Some(join),
        }
    }
}

/// Handle de la tarea del simulador
pub struct SimulatorHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<u64>>,
}

impl SimulatorHandle {
    pub fn is_running(&self) -> bool {
        self.join.as_ref().map_or(false, |j| !j.is_finished())
    }

    /// Detener la tarea y esperar a que termine. Consume el handle, así que
    /// solo puede llamarse una vez. Devuelve el número de ticks ejecutados.
    pub async fn stop(mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let ticks = match self.join.take() {
            Some(join) => match join.await {
                Ok(ticks) => ticks,
                Err(e) => {
                    warn!("⚠️ La tarea del simulador terminó con error: {}", e);
                    0
                }
            },
            None => 0,
        };
        info!("🛑 Simulador de posiciones detenido tras {} ticks", ticks);
        ticks
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            warn!("⚠️ SimulatorHandle descartado sin stop(); abortando la tarea");
            join.abort();
        }
    }
}
