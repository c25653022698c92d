//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen valor por defecto para que la demo arranque sin `.env`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use super::simulation::{SeedConfig, SimulationConfig};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            log_level: tracing::Level::DEBUG,
            simulation: SimulationConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

/// Leer una variable y parsearla; ausente o vacía devuelve `None`
fn parse_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        _ => Ok(None),
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let simulation = SimulationConfig {
            tick_interval: parse_var::<u64>("SIM_TICK_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulation.tick_interval),
            max_step: parse_var("SIM_MAX_STEP")?.unwrap_or(defaults.simulation.max_step),
            rng_seed: parse_var("SIM_SEED")?,
        };
        simulation.validate()?;

        let seed = SeedConfig {
            fleet_size: parse_var("FLEET_SIZE")?.unwrap_or(defaults.seed.fleet_size),
            online_probability: parse_var("FLEET_ONLINE_PROBABILITY")?
                .unwrap_or(defaults.seed.online_probability),
            ..defaults.seed.clone()
        };
        seed.validate()?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins,
            log_level: parse_var("LOG_LEVEL")?.unwrap_or(defaults.log_level),
            simulation,
            seed,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
