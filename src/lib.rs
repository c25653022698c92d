//! EduTrack: núcleo de seguimiento de buses del campus
//!
//! Almacén en memoria de buses, rutas y conductores, simulador de
//! posiciones GPS, resolución de relaciones, gate de sesión por rol y la
//! superficie HTTP que consume la capa de presentación.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
