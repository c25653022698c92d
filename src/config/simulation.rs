//! Configuración de la simulación y de los datos semilla
//! 
//! Constantes del fixture de demostración: intervalo del simulador,
//! desplazamiento máximo por tick y forma de la flota inicial.

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::utils::validation::{validate_coordinates, validate_range};

/// Configuración del simulador de posiciones
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Periodo entre ticks
    pub tick_interval: Duration,
    /// Desplazamiento máximo (en grados) por eje y por tick
    pub max_step: f64,
    /// Semilla opcional para reproducir una corrida
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(3000),
            max_step: 0.0005,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(anyhow!("SIM_TICK_INTERVAL_MS must be greater than zero"));
        }
        validate_range(self.max_step, 0.0, 1.0)
            .map_err(|e| anyhow!("SIM_MAX_STEP out of range: {}", e))?;
        Ok(())
    }
}

/// Configuración de la flota semilla
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub fleet_size: usize,
    pub online_probability: f64,
    pub capacity: u32,
    /// Punto de referencia alrededor del cual se reparten los buses
    pub reference_lat: f64,
    pub reference_lng: f64,
    /// Amplitud total del jitter inicial
    pub spread: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            fleet_size: 25,
            online_probability: 0.6,
            capacity: 40,
            reference_lat: 40.7128,
            reference_lng: -74.0060,
            spread: 0.05,
        }
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<()> {
        validate_range(self.online_probability, 0.0, 1.0)
            .map_err(|e| anyhow!("FLEET_ONLINE_PROBABILITY out of range: {}", e))?;
        validate_coordinates(self.reference_lat, self.reference_lng)
            .map_err(|e| anyhow!("Invalid reference point: {}", e))?;
        Ok(())
    }
}
