use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::signal;
use tracing::{error, info};

use edutrack::config::environment::EnvironmentConfig;
use edutrack::routes::create_router;
use edutrack::services::PositionSimulator;
use edutrack::state::AppState;
use edutrack::store::seed_fleet;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚌 EduTrack - College Bus Tracking");
    info!("==================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() && config.cors_origins.is_empty() {
        info!("🔓 CORS permisivo (desarrollo)");
    }

    // Flota semilla; con SIM_SEED la corrida es reproducible
    let mut rng = match config.simulation.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let fleet = seed_fleet(&mut rng, &config.seed);

    let app_state = AppState::new(config.clone(), fleet);
    let simulator = PositionSimulator::new(app_state.store.clone(), config.simulation.clone()).start();

    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🎭 Sesión:");
    info!("   GET  /api/session - Estado de la sesión");
    info!("   POST /api/session/role - Elegir rol");
    info!("   POST /api/session/login-flow - Pasar de registro a login");
    info!("   POST /api/session/back - Volver a la selección de rol");
    info!("   POST /api/session/register - Registro de pasajero");
    info!("   POST /api/session/login - Login");
    info!("   POST /api/session/logout - Logout");
    info!("🚌 Flota:");
    info!("   GET  /api/fleet/snapshot - Tablas completas");
    info!("   GET  /api/fleet/search?q= - Buscar bus por ruta o número");
    info!("   GET  /api/fleet/stats - Dashboard del manager");
    info!("   GET  /api/fleet/buses/:id - Ficha de bus");
    info!("   PUT  /api/fleet/buses/:id/status - Cambiar estado");
    info!("   PUT  /api/fleet/buses/:id/manage - Guardar ficha");
    info!("   GET  /api/fleet/routes/:id - Ficha de ruta");
    info!("   GET  /api/fleet/routes/:id/active-bus - Bus activo de la ruta");
    info!("   PATCH /api/fleet/drivers/:id - Editar conductor");
    info!("   GET  /api/fleet/me/assignment - Asignación del conductor");
    info!("   PUT  /api/fleet/me/tracking - Tracking del conductor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // El simulador se detiene una sola vez, pase lo que pase con el servidor
    simulator.stop().await;

    if let Err(e) = served {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
