//! Middleware de CORS
//! 
//! La capa de presentación corre en el navegador, normalmente desde otro
//! origen (servidor de desarrollo del frontend).

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// CORS abierto a cualquier origen, para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS restringido a los orígenes de `CORS_ORIGINS`.
/// Los orígenes que no son un header válido se descartan con un warning.
pub fn cors_middleware_with_origins(origins: Vec<String>) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Origen CORS inválido ignorado: '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
